//! Region rows: the fixed 5-member set plus a generated comment.

use serde::Serialize;

use super::dist::Distributions;
use super::stream::{StreamSet, R_CMNT_SD};
use super::text::TextPool;

const R_CMNT_LEN: usize = 72;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Region {
    pub region_key: i64,
    pub name: &'static str,
    pub comment: String,
}

pub(super) fn make_region(
    idx: i64,
    dists: &Distributions,
    pool: &TextPool,
    streams: &mut StreamSet,
) -> Region {
    Region {
        region_key: idx - 1,
        name: dists.regions.text((idx - 1) as usize),
        comment: pool.text(R_CMNT_LEN, R_CMNT_SD, streams),
    }
}

pub(super) fn sd_region(streams: &mut StreamSet, rows: i64) {
    streams.advance(R_CMNT_SD, rows * 2);
}
