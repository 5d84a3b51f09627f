//! Customer row synthesis.

use serde::Serialize;

use super::dist::Distributions;
use super::misc::{alpha_string, phone};
use super::stream::{
    StreamSet, C_ABAL_SD, C_ADDR_SD, C_CMNT_SD, C_MSEG_SD, C_NTRG_SD, C_PHNE_SD,
};
use super::text::TextPool;

const C_ADDR_LEN: usize = 25;
const C_CMNT_LEN: usize = 73;
const C_ABAL_MIN: i64 = -99999;
const C_ABAL_MAX: i64 = 999_999;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Customer {
    pub cust_key: i64,
    pub name: String,
    pub address: String,
    pub nation_key: i64,
    pub phone: String,
    /// Account balance in cents.
    pub acctbal: i64,
    pub mktsegment: &'static str,
    pub comment: String,
}

pub(super) fn make_customer(
    idx: i64,
    dists: &Distributions,
    pool: &TextPool,
    streams: &mut StreamSet,
) -> Customer {
    let address = alpha_string(C_ADDR_LEN, C_ADDR_SD, streams);
    let nation_key = streams.random(0, dists.nations.len() as i64 - 1, C_NTRG_SD);
    let phone = phone(nation_key, C_PHNE_SD, streams);
    let acctbal = streams.random(C_ABAL_MIN, C_ABAL_MAX, C_ABAL_SD);
    let mktsegment = dists.msegmnt.pick(C_MSEG_SD, streams);
    let comment = pool.text(C_CMNT_LEN, C_CMNT_SD, streams);

    Customer {
        cust_key: idx,
        name: format!("Customer#{:09}", idx),
        address,
        nation_key,
        phone,
        acctbal,
        mktsegment,
        comment,
    }
}

/// Positions the customer streams past `rows` rows.
pub(super) fn sd_customer(streams: &mut StreamSet, rows: i64) {
    streams.advance(C_ADDR_SD, rows * 9);
    streams.advance(C_CMNT_SD, rows * 2);
    streams.advance(C_NTRG_SD, rows);
    streams.advance(C_PHNE_SD, rows * 3);
    streams.advance(C_ABAL_SD, rows);
    streams.advance(C_MSEG_SD, rows);
}
