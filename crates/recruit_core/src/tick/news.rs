//! Human-readable recruiting headlines emitted during a tick.

use serde::{Deserialize, Serialize};

use super::TickParams;
use crate::models::{Recruit, RecruitId, RelationshipType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NewsKind {
    SoftCommit,
    Commit,
    Hardened,
    Decommit,
    Sign,
    PackageCommit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub tick: u32,
    pub week: u16,
    pub recruit_id: RecruitId,
    pub team: String,
    pub kind: NewsKind,
    pub text: String,
}

fn tag(recruit: &Recruit) -> String {
    format!(
        "{} ({}-star {}, {})",
        recruit.name,
        recruit.stars,
        recruit.position.as_str(),
        recruit.home_state
    )
}

fn relation_word(kind: RelationshipType) -> &'static str {
    match kind {
        RelationshipType::Twin => "twin",
        RelationshipType::Sibling => "sibling",
        RelationshipType::Cousin => "cousin",
    }
}

impl NewsItem {
    fn new(params: &TickParams, recruit: &Recruit, team: &str, kind: NewsKind, text: String) -> Self {
        Self {
            tick: params.tick,
            week: params.week,
            recruit_id: recruit.id,
            team: team.to_string(),
            kind,
            text,
        }
    }

    pub fn commit(params: &TickParams, recruit: &Recruit, team: &str, soft: bool) -> Self {
        if soft {
            let text = format!("{} gives a soft verbal commitment to {}", tag(recruit), team);
            Self::new(params, recruit, team, NewsKind::SoftCommit, text)
        } else {
            let text = format!("{} commits to {}", tag(recruit), team);
            Self::new(params, recruit, team, NewsKind::Commit, text)
        }
    }

    pub fn hardened(params: &TickParams, recruit: &Recruit, team: &str) -> Self {
        let text = format!("{} firms up commitment to {}", tag(recruit), team);
        Self::new(params, recruit, team, NewsKind::Hardened, text)
    }

    pub fn decommit(params: &TickParams, recruit: &Recruit, team: &str) -> Self {
        let text = format!("{} reopens recruitment, backing off {}", tag(recruit), team);
        Self::new(params, recruit, team, NewsKind::Decommit, text)
    }

    pub fn sign(params: &TickParams, recruit: &Recruit, team: &str) -> Self {
        let text = format!("{} signs with {}", tag(recruit), team);
        Self::new(params, recruit, team, NewsKind::Sign, text)
    }

    pub fn package(
        params: &TickParams,
        first: &Recruit,
        second: &Recruit,
        kind: RelationshipType,
        team: &str,
    ) -> Self {
        let text = format!(
            "{} and {}, the {}s, commit together to {}",
            tag(first),
            tag(second),
            relation_word(kind),
            team
        );
        Self::new(params, first, team, NewsKind::PackageCommit, text)
    }

    pub fn follows(
        params: &TickParams,
        follower: &Recruit,
        leader: &Recruit,
        kind: RelationshipType,
        team: &str,
    ) -> Self {
        let text = format!(
            "{} follows {} {} to {}",
            tag(follower),
            relation_word(kind),
            leader.name,
            team
        );
        Self::new(params, follower, team, NewsKind::PackageCommit, text)
    }
}
