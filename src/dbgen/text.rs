//! The pre-generated text pool.
//!
//! Comment fields are windows into one large buffer of grammar-driven
//! nonsense prose, built once per process. Pool content is a pure function
//! of the sentence stream's initial state and the target size, so a rebuild
//! reproduces it byte for byte, and any prefix is independent of the target
//! size. Row output only matches dbgen at `TEXT_POOL_SIZE`; smaller
//! pools are for benches and tests.

use std::sync::Arc;

use lazy_static::lazy_static;

use super::dist::{shared_distributions, Distribution, Distributions};
use super::stream::{StreamSet, TEXT_SD};

/// Reference pool size. Comment offsets are drawn against the pool length,
/// so this value is part of the output contract.
pub const TEXT_POOL_SIZE: usize = 300 * 1024 * 1024;

/// Variable-length fields span `[0.4 * avg, 1.6 * avg]`.
pub const V_STR_LOW: f64 = 0.4;
pub const V_STR_HGH: f64 = 1.6;

pub struct TextPool {
    pool: Vec<u8>,
}

impl TextPool {
    /// Builds a pool of exactly `target` bytes, appending "sentence + space"
    /// until the next sentence would overflow and then truncating the final
    /// sentence to the remainder.
    pub fn build(target: usize, dists: &Distributions) -> Self {
        let mut streams = StreamSet::new();
        let mut pool = Vec::with_capacity(target);
        while pool.len() < target {
            let next = sentence(dists, &mut streams);
            let needed = target - pool.len();
            if needed >= next.len() + 1 {
                pool.extend_from_slice(next.as_bytes());
                pool.push(b' ');
            } else {
                pool.extend_from_slice(&next.as_bytes()[..needed]);
            }
        }
        TextPool { pool }
    }

    pub fn size(&self) -> usize {
        self.pool.len()
    }

    /// A comment of average length `avg`: one offset draw, one length draw,
    /// in that order, both from stream `sd`.
    pub fn text(&self, avg: usize, sd: usize, streams: &mut StreamSet) -> String {
        let min = (avg as f64 * V_STR_LOW) as i64;
        let max = (avg as f64 * V_STR_HGH) as i64;
        let offset = streams.random(0, self.pool.len() as i64 - max, sd) as usize;
        let len = streams.random(min, max, sd) as usize;
        String::from_utf8_lossy(&self.pool[offset..offset + len]).into_owned()
    }
}

lazy_static! {
    static ref REFERENCE_POOL: Arc<TextPool> =
        Arc::new(TextPool::build(TEXT_POOL_SIZE, &shared_distributions()));
}

/// The process-wide reference-size pool, built on first use.
pub fn reference_pool() -> Arc<TextPool> {
    Arc::clone(&REFERENCE_POOL)
}

fn noun_phrase(dists: &Distributions, streams: &mut StreamSet) -> String {
    let syntax = dists.np.pick(TEXT_SD, streams);
    let mut buf = String::new();
    for item in syntax.split(' ') {
        let src: &Distribution = match item.as_bytes()[0] {
            b'A' => &dists.articles,
            b'J' => &dists.adjectives,
            b'D' => &dists.adverbs,
            b'N' => &dists.nouns,
            other => panic!("bad noun-phrase symbol {}", other as char),
        };
        buf.push_str(src.pick(TEXT_SD, streams));
        if item.len() > 1 {
            buf.push(item.as_bytes()[1] as char);
        }
        buf.push(' ');
    }
    buf
}

fn verb_phrase(dists: &Distributions, streams: &mut StreamSet) -> String {
    let syntax = dists.vp.pick(TEXT_SD, streams);
    let mut buf = String::new();
    for item in syntax.split(' ') {
        let src: &Distribution = match item.as_bytes()[0] {
            b'D' => &dists.adverbs,
            b'V' => &dists.verbs,
            b'X' => &dists.auxillaries,
            other => panic!("bad verb-phrase symbol {}", other as char),
        };
        buf.push_str(src.pick(TEXT_SD, streams));
        if item.len() > 1 {
            buf.push(item.as_bytes()[1] as char);
        }
        buf.push(' ');
    }
    buf
}

fn sentence(dists: &Distributions, streams: &mut StreamSet) -> String {
    let syntax = dists.grammar.pick(TEXT_SD, streams);
    let mut buf = String::new();
    for item in syntax.split(' ') {
        match item.as_bytes()[0] {
            b'V' => buf.push_str(&verb_phrase(dists, streams)),
            b'N' => buf.push_str(&noun_phrase(dists, streams)),
            b'P' => {
                buf.push_str(dists.prepositions.pick(TEXT_SD, streams));
                buf.push_str(" the ");
                buf.push_str(&noun_phrase(dists, streams));
            }
            b'T' => {
                // The terminator replaces the trailing space.
                buf.pop();
                buf.push_str(dists.terminators.pick(TEXT_SD, streams));
            }
            other => panic!("bad sentence symbol {}", other as char),
        }
        if item.len() > 1 {
            buf.push(item.as_bytes()[1] as char);
        }
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPECT_PREFIX: &str = "furiously special foxes haggle furiously blithely ironic deposits. slyly final theodolites boost slyly even asymptotes. carefully final foxes wake furiously around the furiously bold deposits. foxes around the pending, special theodolites believe about the special accounts. furiously special packages wake about the slyly ironic accounts. ironic accounts sleep. blithely pending ideas sleep blithely. carefully bold attainments unwind along the even foxes. blithely regular accounts haggle blithely above the quick pinto beans. requests cajole slyly across the slyly pending ideas. evenly even deposits hinder bold deposits. quick, careful packages could have to use slyly ideas. instructions about the foxes detect across the quickly regular requests. furiously final orbits across the fluffily special dependencies boost slyly about the express theodolites. evenly bold excuses need to wake. slyly even pinto beans use blithely according to the special packages. quickly regular dependencies sleep";

    #[test]
    fn pool_prefix_matches_reference() {
        let dists = Distributions::load();
        let pool = TextPool::build(2000, &dists);
        assert_eq!(&pool.pool[..1000], EXPECT_PREFIX.as_bytes());
    }

    #[test]
    fn pool_is_deterministic_and_exactly_sized() {
        let dists = Distributions::load();
        let a = TextPool::build(64 * 1024, &dists);
        let b = TextPool::build(64 * 1024, &dists);
        assert_eq!(a.size(), 64 * 1024);
        assert_eq!(a.pool, b.pool);
    }

    #[test]
    fn larger_pool_shares_the_prefix() {
        let dists = Distributions::load();
        let small = TextPool::build(4096, &dists);
        let large = TextPool::build(16 * 1024, &dists);
        assert_eq!(small.pool[..], large.pool[..4096]);
    }

    #[test]
    fn text_lengths_stay_in_band() {
        let dists = Distributions::load();
        let pool = TextPool::build(64 * 1024, &dists);
        let mut streams = StreamSet::new();
        for _ in 0..200 {
            let t = pool.text(50, crate::dbgen::stream::P_CMNT_SD, &mut streams);
            assert!(t.len() >= 20 && t.len() <= 80, "len {}", t.len());
        }
    }
}
