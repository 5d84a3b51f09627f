//! Part and part-supplier row synthesis.

use serde::Serialize;

use super::dist::Distributions;
use super::driver::SUPPLIER_BASE;
use super::misc::retail_price;
use super::stream::{
    StreamSet, PS_CMNT_SD, PS_QTY_SD, PS_SCST_SD, P_BRND_SD, P_CMNT_SD, P_CNTR_SD, P_MFG_SD,
    P_NAME_SD, P_SIZE_SD, P_TYPE_SD,
};
use super::text::TextPool;

pub const SUPP_PER_PART: i64 = 4;

const P_NAME_SCL: usize = 5;
const P_MFG_MIN: i64 = 1;
const P_MFG_MAX: i64 = 5;
const P_BRND_MIN: i64 = 1;
const P_BRND_MAX: i64 = 5;
const P_SIZE_MIN: i64 = 1;
const P_SIZE_MAX: i64 = 50;
const P_CMNT_LEN: usize = 14;
const PS_QTY_MIN: i64 = 1;
const PS_QTY_MAX: i64 = 9999;
const PS_SCST_MIN: i64 = 100;
const PS_SCST_MAX: i64 = 100_000;
const PS_CMNT_LEN: usize = 124;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartSupp {
    pub part_key: i64,
    pub supp_key: i64,
    pub qty: i64,
    /// Supply cost in cents.
    pub supply_cost: i64,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Part {
    pub part_key: i64,
    pub name: String,
    pub mfgr: String,
    pub brand: String,
    pub part_type: &'static str,
    pub size: i64,
    pub container: &'static str,
    /// Retail price in cents.
    pub retail_price: i64,
    pub comment: String,
    pub suppliers: Vec<PartSupp>,
}

/// The k-th supplier of a part is a pure function of the keys; no stream is
/// consumed, so part-supplier pairs survive any partitioning.
pub fn part_supp_bridge(part_key: i64, supp_slot: i64, scale: i64) -> i64 {
    let total_supps = SUPPLIER_BASE * scale;
    (part_key + supp_slot * (total_supps / SUPP_PER_PART + (part_key - 1) / total_supps))
        % total_supps
        + 1
}

pub(super) fn make_part(
    idx: i64,
    scale: i64,
    dists: &Distributions,
    pool: &TextPool,
    streams: &mut StreamSet,
) -> Part {
    let name = dists.colors.agg_str(P_NAME_SCL, P_NAME_SD, streams);
    let mfg = streams.random(P_MFG_MIN, P_MFG_MAX, P_MFG_SD);
    let brnd = streams.random(P_BRND_MIN, P_BRND_MAX, P_BRND_SD);
    let part_type = dists.p_types.pick(P_TYPE_SD, streams);
    let size = streams.random(P_SIZE_MIN, P_SIZE_MAX, P_SIZE_SD);
    let container = dists.p_cntr.pick(P_CNTR_SD, streams);
    let comment = pool.text(P_CMNT_LEN, P_CMNT_SD, streams);

    let mut suppliers = Vec::with_capacity(SUPP_PER_PART as usize);
    for slot in 0..SUPP_PER_PART {
        suppliers.push(PartSupp {
            part_key: idx,
            supp_key: part_supp_bridge(idx, slot, scale),
            qty: streams.random(PS_QTY_MIN, PS_QTY_MAX, PS_QTY_SD),
            supply_cost: streams.random(PS_SCST_MIN, PS_SCST_MAX, PS_SCST_SD),
            comment: pool.text(PS_CMNT_LEN, PS_CMNT_SD, streams),
        });
    }

    Part {
        part_key: idx,
        name,
        mfgr: format!("Manufacturer#{}", mfg),
        brand: format!("Brand#{:02}", mfg * 10 + brnd),
        part_type,
        size,
        container,
        retail_price: retail_price(idx),
        comment,
        suppliers,
    }
}

/// Positions the part streams past `rows` rows.
pub(super) fn sd_part(streams: &mut StreamSet, rows: i64) {
    for sd in P_MFG_SD..=P_CNTR_SD {
        streams.advance(sd, rows);
    }
    streams.advance(P_CMNT_SD, rows * 2);
    streams.advance(P_NAME_SD, rows * 92);
}

/// Positions the part-supplier streams past `rows` part rows.
pub(super) fn sd_part_supp(streams: &mut StreamSet, rows: i64) {
    for _ in 0..SUPP_PER_PART {
        streams.advance(PS_QTY_SD, rows);
        streams.advance(PS_SCST_SD, rows);
        streams.advance(PS_CMNT_SD, rows * 2);
    }
}
