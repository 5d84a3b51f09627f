//! Nation rows: the fixed 25-member set plus a generated comment.

use serde::Serialize;

use super::dist::Distributions;
use super::stream::{StreamSet, N_CMNT_SD};
use super::text::TextPool;

const N_CMNT_LEN: usize = 72;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Nation {
    pub nation_key: i64,
    pub name: &'static str,
    /// Region key; the accumulated set weights encode the region mapping.
    pub region_key: i64,
    pub comment: String,
}

pub(super) fn make_nation(
    idx: i64,
    dists: &Distributions,
    pool: &TextPool,
    streams: &mut StreamSet,
) -> Nation {
    let member = (idx - 1) as usize;
    Nation {
        nation_key: idx - 1,
        name: dists.nations.text(member),
        region_key: dists.nations.weight(member),
        comment: pool.text(N_CMNT_LEN, N_CMNT_SD, streams),
    }
}

pub(super) fn sd_nation(streams: &mut StreamSet, rows: i64) {
    streams.advance(N_CMNT_SD, rows * 2);
}
