//! Supplier row synthesis.

use serde::Serialize;

use super::dist::Distributions;
use super::misc::{alpha_string, phone};
use super::stream::{
    StreamSet, BBB_CMNT_SD, BBB_JNK_SD, BBB_OFFSET_SD, BBB_TYPE_SD, S_ABAL_SD, S_ADDR_SD,
    S_CMNT_SD, S_NTRG_SD, S_PHNE_SD,
};
use super::text::TextPool;

const S_ADDR_LEN: usize = 25;
const S_CMNT_LEN: usize = 63;
const S_ABAL_MIN: i64 = -99999;
const S_ABAL_MAX: i64 = 999_999;

// One supplier in a thousand gets "Customer Complaints" or "Customer
// Recommends" spliced over its generated comment.
const S_CMNT_BBB: i64 = 10;
const BBB_DEADBEATS: i64 = 50;
const BBB_BASE: &str = "Customer ";
const BBB_COMPLAIN: &str = "Complaints";
const BBB_COMMEND: &str = "Recommends";
const BBB_CMNT_LEN: i64 = 19;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Supplier {
    pub supp_key: i64,
    pub name: String,
    pub address: String,
    pub nation_key: i64,
    pub phone: String,
    /// Account balance in cents.
    pub acctbal: i64,
    pub comment: String,
}

pub(super) fn make_supplier(
    idx: i64,
    dists: &Distributions,
    pool: &TextPool,
    streams: &mut StreamSet,
) -> Supplier {
    let address = alpha_string(S_ADDR_LEN, S_ADDR_SD, streams);
    let nation_key = streams.random(0, dists.nations.len() as i64 - 1, S_NTRG_SD);
    let phone = phone(nation_key, S_PHNE_SD, streams);
    let acctbal = streams.random(S_ABAL_MIN, S_ABAL_MAX, S_ABAL_SD);
    let mut comment = pool.text(S_CMNT_LEN, S_CMNT_SD, streams);

    // All four draws happen whether or not the splice applies.
    let bad_press = streams.random(1, 10_000, BBB_CMNT_SD);
    let kind = streams.random(0, 100, BBB_TYPE_SD);
    let noise = streams.random(0, comment.len() as i64 - BBB_CMNT_LEN, BBB_JNK_SD);
    let offset = streams.random(0, comment.len() as i64 - (BBB_CMNT_LEN + noise), BBB_OFFSET_SD);

    if bad_press <= S_CMNT_BBB {
        let offset = offset as usize;
        let noise = noise as usize;
        comment.replace_range(offset..offset + BBB_BASE.len(), BBB_BASE);
        let start = BBB_BASE.len() + offset + noise;
        let word = if kind < BBB_DEADBEATS {
            BBB_COMPLAIN
        } else {
            BBB_COMMEND
        };
        comment.replace_range(start..start + word.len(), word);
    }

    Supplier {
        supp_key: idx,
        name: format!("Supplier#{:09}", idx),
        address,
        nation_key,
        phone,
        acctbal,
        comment,
    }
}

/// Positions the supplier streams past `rows` rows.
pub(super) fn sd_supplier(streams: &mut StreamSet, rows: i64) {
    streams.advance(S_NTRG_SD, rows);
    streams.advance(S_PHNE_SD, rows * 3);
    streams.advance(S_ABAL_SD, rows);
    streams.advance(S_ADDR_SD, rows * 9);
    streams.advance(S_CMNT_SD, rows * 2);
    streams.advance(BBB_CMNT_SD, rows);
    streams.advance(BBB_JNK_SD, rows);
    streams.advance(BBB_OFFSET_SD, rows);
    streams.advance(BBB_TYPE_SD, rows);
}
