//! Order-significant weighted sets.
//!
//! Selection scans members in declaration order for the first cumulative
//! weight at or above the drawn value, so both member order and the
//! accumulated weights must match the source data exactly. Sets are built
//! once and shared read-only across generation workers.

use std::sync::Arc;

use lazy_static::lazy_static;

use super::dist_data;
use super::stream::StreamSet;

lazy_static! {
    static ref SHARED: Arc<Distributions> = Arc::new(Distributions::load());
}

/// The process-wide distribution set; immutable, so one copy serves every
/// generation worker.
pub fn shared_distributions() -> Arc<Distributions> {
    Arc::clone(&SHARED)
}

#[derive(Debug, Clone, Copy)]
struct Member {
    text: &'static str,
    // Cumulative weight: the sum of this member's source weight and every
    // weight declared before it.
    weight: i64,
}

#[derive(Debug, Clone)]
pub struct Distribution {
    members: Vec<Member>,
    max: i64,
}

impl Distribution {
    fn load(data: &[(&'static str, i64)]) -> Self {
        let mut max = 0;
        let members = data
            .iter()
            .map(|&(text, weight)| {
                max += weight;
                Member { text, weight: max }
            })
            .collect();
        Distribution { members, max }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn text(&self, i: usize) -> &'static str {
        self.members[i].text
    }

    /// Cumulative weight of member `i`. For the nations set this is the
    /// member's region key: the source weights are deltas chosen so the
    /// running sum lands on the owning region.
    pub fn weight(&self, i: usize) -> i64 {
        self.members[i].weight
    }

    /// Draws one member, weighted: `j` uniform in `[1, max]`, first member
    /// whose cumulative weight reaches `j` wins.
    pub fn pick(&self, sd: usize, streams: &mut StreamSet) -> &'static str {
        let j = streams.random(1, self.max, sd);
        let mut pos = 0;
        while self.members[pos].weight < j {
            pos += 1;
        }
        self.members[pos].text
    }

    /// Stream-seeded Fisher-Yates over the member indices, one draw per
    /// member. Returns a fresh vector so shared sets stay immutable.
    pub fn permute(&self, sd: usize, streams: &mut StreamSet) -> Vec<usize> {
        let count = self.members.len();
        let mut perm: Vec<usize> = (0..count).collect();
        for i in 0..count {
            let source = streams.random(i as i64, count as i64 - 1, sd) as usize;
            perm.swap(i, source);
        }
        perm
    }

    /// First `count` members of a fresh permutation, space-joined. Used
    /// where a field needs several distinct members of one set.
    pub fn agg_str(&self, count: usize, sd: usize, streams: &mut StreamSet) -> String {
        let perm = self.permute(sd, streams);
        let mut out = String::new();
        for &idx in &perm[..count] {
            out.push_str(self.members[idx].text);
            out.push(' ');
        }
        out.pop();
        out
    }
}

/// Every weighted set the generator reads, loaded once.
#[derive(Debug, Clone)]
pub struct Distributions {
    pub p_cntr: Distribution,
    pub colors: Distribution,
    pub p_types: Distribution,
    pub nations: Distribution,
    pub regions: Distribution,
    pub o_oprio: Distribution,
    pub instruct: Distribution,
    pub smode: Distribution,
    pub category: Distribution,
    pub rflag: Distribution,
    pub msegmnt: Distribution,
    pub nouns: Distribution,
    pub verbs: Distribution,
    pub adjectives: Distribution,
    pub adverbs: Distribution,
    pub auxillaries: Distribution,
    pub terminators: Distribution,
    pub articles: Distribution,
    pub prepositions: Distribution,
    pub grammar: Distribution,
    pub np: Distribution,
    pub vp: Distribution,
}

impl Distributions {
    pub fn load() -> Self {
        Distributions {
            p_cntr: Distribution::load(dist_data::P_CNTR),
            colors: Distribution::load(dist_data::COLORS),
            p_types: Distribution::load(dist_data::P_TYPES),
            nations: Distribution::load(dist_data::NATIONS),
            regions: Distribution::load(dist_data::REGIONS),
            o_oprio: Distribution::load(dist_data::O_OPRIO),
            instruct: Distribution::load(dist_data::INSTRUCT),
            smode: Distribution::load(dist_data::SMODE),
            category: Distribution::load(dist_data::CATEGORY),
            rflag: Distribution::load(dist_data::RFLAG),
            msegmnt: Distribution::load(dist_data::MSEGMNT),
            nouns: Distribution::load(dist_data::NOUNS),
            verbs: Distribution::load(dist_data::VERBS),
            adjectives: Distribution::load(dist_data::ADJECTIVES),
            adverbs: Distribution::load(dist_data::ADVERBS),
            auxillaries: Distribution::load(dist_data::AUXILLARIES),
            terminators: Distribution::load(dist_data::TERMINATORS),
            articles: Distribution::load(dist_data::ARTICLES),
            prepositions: Distribution::load(dist_data::PREPOSITIONS),
            grammar: Distribution::load(dist_data::GRAMMAR),
            np: Distribution::load(dist_data::NP),
            vp: Distribution::load(dist_data::VP),
        }
    }
}
