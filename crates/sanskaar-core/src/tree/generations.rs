use serde::Serialize;

use crate::entities::{FamilyMember, MemberRelation};

/// Display tier of the generation view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Generation {
    Grandparents,
    Parents,
    #[serde(rename = "self")]
    SelfAndSiblings,
    Children,
    Grandchildren,
    Others,
}

impl Generation {
    /// Tiers from oldest to youngest, `Others` last
    pub const ORDER: [Generation; 6] = [
        Self::Grandparents,
        Self::Parents,
        Self::SelfAndSiblings,
        Self::Children,
        Self::Grandchildren,
        Self::Others,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Grandparents => "Grandparents",
            Self::Parents => "Parents",
            Self::SelfAndSiblings => "Self & Siblings",
            Self::Children => "Children",
            Self::Grandchildren => "Grandchildren",
            Self::Others => "Others",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Grandparents => "grandparents",
            Self::Parents => "parents",
            Self::SelfAndSiblings => "self",
            Self::Children => "children",
            Self::Grandchildren => "grandchildren",
            Self::Others => "others",
        }
    }

    pub fn of(relation: MemberRelation) -> Self {
        match relation {
            MemberRelation::Grandparent => Self::Grandparents,
            MemberRelation::Parent => Self::Parents,
            MemberRelation::Ego | MemberRelation::Spouse | MemberRelation::Sibling => {
                Self::SelfAndSiblings
            }
            MemberRelation::Child => Self::Children,
            MemberRelation::Grandchild => Self::Grandchildren,
            MemberRelation::Other => Self::Others,
        }
    }
}

/// Members bucketed by relation label, input order kept within a bucket
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationView<'a> {
    pub grandparents: Vec<&'a FamilyMember>,
    pub parents: Vec<&'a FamilyMember>,
    pub self_and_siblings: Vec<&'a FamilyMember>,
    pub children: Vec<&'a FamilyMember>,
    pub grandchildren: Vec<&'a FamilyMember>,
    pub others: Vec<&'a FamilyMember>,
}

impl<'a> GenerationView<'a> {
    pub fn bucket(&self, generation: Generation) -> &[&'a FamilyMember] {
        match generation {
            Generation::Grandparents => &self.grandparents,
            Generation::Parents => &self.parents,
            Generation::SelfAndSiblings => &self.self_and_siblings,
            Generation::Children => &self.children,
            Generation::Grandchildren => &self.grandchildren,
            Generation::Others => &self.others,
        }
    }

    fn bucket_mut(&mut self, generation: Generation) -> &mut Vec<&'a FamilyMember> {
        match generation {
            Generation::Grandparents => &mut self.grandparents,
            Generation::Parents => &mut self.parents,
            Generation::SelfAndSiblings => &mut self.self_and_siblings,
            Generation::Children => &mut self.children,
            Generation::Grandchildren => &mut self.grandchildren,
            Generation::Others => &mut self.others,
        }
    }

    /// Non-empty tiers in display order
    pub fn tiers(&self) -> Vec<(Generation, &[&'a FamilyMember])> {
        Generation::ORDER
            .into_iter()
            .map(|g| (g, self.bucket(g)))
            .filter(|(_, members)| !members.is_empty())
            .collect()
    }

    pub fn len(&self) -> usize {
        Generation::ORDER.iter().map(|g| self.bucket(*g).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Bucket members by their `relation` label
pub fn group_by_generation(members: &[FamilyMember]) -> GenerationView<'_> {
    let mut view = GenerationView::default();
    for member in members {
        view.bucket_mut(Generation::of(member.relation)).push(member);
    }
    view
}
