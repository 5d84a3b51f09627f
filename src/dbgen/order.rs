//! Order and lineitem row synthesis. One order row carries its attached
//! lineitems; the two tables are emitted from a single generation pass.

use serde::Serialize;

use super::dist::Distributions;
use super::driver::CUSTOMER_BASE;
use super::misc::{
    julian, retail_price, sparse_key, AsciiDates, CURRENTDATE, STARTDATE, TOTDATE,
};
use super::part::part_supp_bridge;
use super::stream::{
    StreamSet, L_CDTE_SD, L_CMNT_SD, L_DCNT_SD, L_PKEY_SD, L_QTY_SD, L_RDTE_SD, L_RFLG_SD,
    L_SDTE_SD, L_SHIP_SD, L_SKEY_SD, L_SMODE_SD, L_TAX_SD, O_CKEY_SD, O_CLRK_SD, O_CMNT_SD,
    O_LCNT_SD, O_ODATE_SD, O_PRIO_SD, O_SUPP_SD,
};
use super::text::TextPool;

pub const O_LCNT_MIN: i64 = 1;
pub const O_LCNT_MAX: i64 = 7;

const O_CKEY_MIN: i64 = 1;
const O_CMNT_LEN: usize = 49;
const O_CLRK_SCL: i64 = 1000;

const L_QTY_MIN: i64 = 1;
const L_QTY_MAX: i64 = 50;
const L_TAX_MIN: i64 = 0;
const L_TAX_MAX: i64 = 8;
const L_DCNT_MIN: i64 = 0;
const L_DCNT_MAX: i64 = 10;
const L_PKEY_MIN: i64 = 1;
const L_SDTE_MIN: i64 = 1;
const L_SDTE_MAX: i64 = 121;
const L_CDTE_MIN: i64 = 30;
const L_CDTE_MAX: i64 = 90;
const L_RDTE_MIN: i64 = 1;
const L_RDTE_MAX: i64 = 30;
const L_CMNT_LEN: usize = 27;

const PENNIES: i64 = 100;

/// Key draws switch to the 64-bit streams at this scale factor.
const MAX_32B_SCALE: i64 = 30_000;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lineitem {
    pub order_key: i64,
    pub part_key: i64,
    pub supp_key: i64,
    pub line_number: i64,
    pub quantity: i64,
    /// `retail_price(part_key) * quantity`, in cents.
    pub extended_price: i64,
    /// Discount in hundredths.
    pub discount: i64,
    /// Tax in hundredths.
    pub tax: i64,
    pub return_flag: char,
    pub line_status: char,
    pub ship_date: String,
    pub commit_date: String,
    pub receipt_date: String,
    pub ship_instruct: &'static str,
    pub ship_mode: &'static str,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub order_key: i64,
    pub cust_key: i64,
    pub status: char,
    /// Total in cents, accumulated with integer arithmetic only.
    pub total_price: i64,
    pub date: String,
    pub priority: &'static str,
    pub clerk: String,
    pub ship_priority: i64,
    pub comment: String,
    pub lines: Vec<Lineitem>,
}

fn odate_max() -> i64 {
    STARTDATE + TOTDATE - (L_SDTE_MAX + L_RDTE_MAX) - 1
}

fn pick_clerk(scale: i64, streams: &mut StreamSet) -> String {
    let clk_num = streams.random(1, (scale * O_CLRK_SCL).max(O_CLRK_SCL), O_CLRK_SD);
    format!("Clerk#{:09}", clk_num)
}

pub(super) fn make_order(
    idx: i64,
    scale: i64,
    dists: &Distributions,
    pool: &TextPool,
    dates: &AsciiDates,
    streams: &mut StreamSet,
) -> Order {
    let order_key = sparse_key(idx);
    let ckey_max = CUSTOMER_BASE * scale;
    let mut cust_key = if scale >= MAX_32B_SCALE {
        streams.random64(O_CKEY_MIN, ckey_max, O_CKEY_SD)
    } else {
        streams.random(O_CKEY_MIN, ckey_max, O_CKEY_SD)
    };
    // A third of the customers never place an order: keys that are
    // multiples of three are walked off by alternating +-1, clamped to the
    // key range. No stream draw is consumed by the walk.
    let mut delta = 1;
    while cust_key % 3 == 0 {
        cust_key += delta;
        cust_key = cust_key.min(ckey_max);
        delta *= -1;
    }

    let tmp_date = streams.random(STARTDATE, odate_max(), O_ODATE_SD);
    let priority = dists.o_oprio.pick(O_PRIO_SD, streams);
    let clerk = pick_clerk(scale, streams);
    let comment = pool.text(O_CMNT_LEN, O_CMNT_SD, streams);
    let line_count = streams.random(O_LCNT_MIN, O_LCNT_MAX, O_LCNT_SD);

    let mut lines = Vec::with_capacity(line_count as usize);
    let mut total_price = 0;
    let mut shipped = 0i64;

    for l in 0..line_count {
        let quantity = streams.random(L_QTY_MIN, L_QTY_MAX, L_QTY_SD);
        let discount = streams.random(L_DCNT_MIN, L_DCNT_MAX, L_DCNT_SD);
        let tax = streams.random(L_TAX_MIN, L_TAX_MAX, L_TAX_SD);
        let ship_instruct = dists.instruct.pick(L_SHIP_SD, streams);
        let ship_mode = dists.smode.pick(L_SMODE_SD, streams);
        let comment = pool.text(L_CMNT_LEN, L_CMNT_SD, streams);

        let pkey_max = super::driver::PART_BASE * scale;
        let part_key = if scale >= MAX_32B_SCALE {
            streams.random64(L_PKEY_MIN, pkey_max, L_PKEY_SD)
        } else {
            streams.random(L_PKEY_MIN, pkey_max, L_PKEY_SD)
        };

        let r_price = retail_price(part_key);
        let supp_slot = streams.random(0, 3, L_SKEY_SD);
        let supp_key = part_supp_bridge(part_key, supp_slot, scale);
        let extended_price = r_price * quantity;

        total_price += ((extended_price * (100 - discount)) / PENNIES) * (100 + tax) / PENNIES;

        let s_date = streams.random(L_SDTE_MIN, L_SDTE_MAX, L_SDTE_SD) + tmp_date;
        let c_date = streams.random(L_CDTE_MIN, L_CDTE_MAX, L_CDTE_SD) + tmp_date;
        let r_date = streams.random(L_RDTE_MIN, L_RDTE_MAX, L_RDTE_SD) + s_date;

        // The return flag only consumes a draw for already-received lines;
        // row_stop realigns the stream afterwards.
        let return_flag = if julian(r_date) <= CURRENTDATE {
            dists.rflag.pick(L_RFLG_SD, streams).as_bytes()[0] as char
        } else {
            'N'
        };
        let line_status = if julian(s_date) <= CURRENTDATE {
            shipped += 1;
            'F'
        } else {
            'O'
        };

        lines.push(Lineitem {
            order_key,
            part_key,
            supp_key,
            line_number: l + 1,
            quantity,
            extended_price,
            discount,
            tax,
            return_flag,
            line_status,
            ship_date: dates.get(s_date).to_string(),
            commit_date: dates.get(c_date).to_string(),
            receipt_date: dates.get(r_date).to_string(),
            ship_instruct,
            ship_mode,
            comment,
        });
    }

    let mut status = 'O';
    if shipped > 0 {
        status = 'P';
    }
    if shipped == line_count {
        status = 'F';
    }

    Order {
        order_key,
        cust_key,
        status,
        total_price,
        date: dates.get(tmp_date).to_string(),
        priority,
        clerk,
        ship_priority: 0,
        comment,
        lines,
    }
}

/// Positions the order streams past `rows` rows.
pub(super) fn sd_order(streams: &mut StreamSet, rows: i64) {
    streams.advance(O_LCNT_SD, rows);
    streams.advance(O_CKEY_SD, rows);
    streams.advance(O_CMNT_SD, rows * 2);
    streams.advance(O_SUPP_SD, rows);
    streams.advance(O_CLRK_SD, rows);
    streams.advance(O_PRIO_SD, rows);
    streams.advance(O_ODATE_SD, rows);
}

/// Positions the lineitem streams past `rows` order rows (each order skips
/// its full seven-line draw budget).
pub(super) fn sd_lineitem(streams: &mut StreamSet, rows: i64) {
    for _ in 0..O_LCNT_MAX {
        for sd in L_QTY_SD..=L_RFLG_SD {
            streams.advance(sd, rows);
        }
        streams.advance(L_CMNT_SD, rows * 2);
    }
    // The order-side date and customer-key streams were consumed by the
    // same pass; their usage counters restart with the partition.
    streams.reset_usage(O_ODATE_SD);
    streams.reset_usage(O_CKEY_SD);
}
