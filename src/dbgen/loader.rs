//! Per-table adapters from synthesized rows to positional sink values.
//!
//! Column order is the table schema's declared order; money columns cross
//! the boundary as fixed-point decimal strings. The composite loaders feed
//! a master table and its detail table from one generation pass.

use crate::sink::{Sink, SinkError};

use super::driver::Row;
use super::misc::Money;

pub const PART_COLUMNS: &[&str] = &[
    "P_PARTKEY",
    "P_NAME",
    "P_MFGR",
    "P_BRAND",
    "P_TYPE",
    "P_SIZE",
    "P_CONTAINER",
    "P_RETAILPRICE",
    "P_COMMENT",
];

pub const PARTSUPP_COLUMNS: &[&str] = &[
    "PS_PARTKEY",
    "PS_SUPPKEY",
    "PS_AVAILQTY",
    "PS_SUPPLYCOST",
    "PS_COMMENT",
];

pub const SUPPLIER_COLUMNS: &[&str] = &[
    "S_SUPPKEY",
    "S_NAME",
    "S_ADDRESS",
    "S_NATIONKEY",
    "S_PHONE",
    "S_ACCTBAL",
    "S_COMMENT",
];

pub const CUSTOMER_COLUMNS: &[&str] = &[
    "C_CUSTKEY",
    "C_NAME",
    "C_ADDRESS",
    "C_NATIONKEY",
    "C_PHONE",
    "C_ACCTBAL",
    "C_MKTSEGMENT",
    "C_COMMENT",
];

pub const ORDERS_COLUMNS: &[&str] = &[
    "O_ORDERKEY",
    "O_CUSTKEY",
    "O_ORDERSTATUS",
    "O_TOTALPRICE",
    "O_ORDERDATE",
    "O_ORDERPRIORITY",
    "O_CLERK",
    "O_SHIPPRIORITY",
    "O_COMMENT",
];

pub const LINEITEM_COLUMNS: &[&str] = &[
    "L_ORDERKEY",
    "L_PARTKEY",
    "L_SUPPKEY",
    "L_LINENUMBER",
    "L_QUANTITY",
    "L_EXTENDEDPRICE",
    "L_DISCOUNT",
    "L_TAX",
    "L_RETURNFLAG",
    "L_LINESTATUS",
    "L_SHIPDATE",
    "L_COMMITDATE",
    "L_RECEIPTDATE",
    "L_SHIPINSTRUCT",
    "L_SHIPMODE",
    "L_COMMENT",
];

pub const NATION_COLUMNS: &[&str] = &["N_NATIONKEY", "N_NAME", "N_REGIONKEY", "N_COMMENT"];

pub const REGION_COLUMNS: &[&str] = &["R_REGIONKEY", "R_NAME", "R_COMMENT"];

/// A sink adapter for one table. Feeding a row of the wrong kind is a
/// programming error in the generation dispatch and panics.
pub trait RowLoader {
    fn load(&mut self, row: &Row) -> Result<(), SinkError>;
    fn flush(&mut self) -> Result<(), SinkError>;
    fn close(&mut self) -> Result<(), SinkError>;
}

pub struct PartLoader<S: Sink> {
    sink: S,
}

impl<S: Sink> PartLoader<S> {
    pub fn new(sink: S) -> Self {
        PartLoader { sink }
    }
}

impl<S: Sink> RowLoader for PartLoader<S> {
    fn load(&mut self, row: &Row) -> Result<(), SinkError> {
        let Row::Part(part) = row else {
            panic!("part loader fed a {} row", row.kind());
        };
        self.sink.write_row(vec![
            part.part_key.into(),
            part.name.clone().into(),
            part.mfgr.clone().into(),
            part.brand.clone().into(),
            part.part_type.into(),
            part.size.into(),
            part.container.into(),
            Money(part.retail_price).into(),
            part.comment.clone().into(),
        ])
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.sink.flush()
    }

    fn close(&mut self) -> Result<(), SinkError> {
        self.sink.close()
    }
}

pub struct PartSuppLoader<S: Sink> {
    sink: S,
}

impl<S: Sink> PartSuppLoader<S> {
    pub fn new(sink: S) -> Self {
        PartSuppLoader { sink }
    }
}

impl<S: Sink> RowLoader for PartSuppLoader<S> {
    fn load(&mut self, row: &Row) -> Result<(), SinkError> {
        let Row::Part(part) = row else {
            panic!("partsupp loader fed a {} row", row.kind());
        };
        for ps in &part.suppliers {
            self.sink.write_row(vec![
                ps.part_key.into(),
                ps.supp_key.into(),
                ps.qty.into(),
                Money(ps.supply_cost).into(),
                ps.comment.clone().into(),
            ])?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.sink.flush()
    }

    fn close(&mut self) -> Result<(), SinkError> {
        self.sink.close()
    }
}

pub struct SupplierLoader<S: Sink> {
    sink: S,
}

impl<S: Sink> SupplierLoader<S> {
    pub fn new(sink: S) -> Self {
        SupplierLoader { sink }
    }
}

impl<S: Sink> RowLoader for SupplierLoader<S> {
    fn load(&mut self, row: &Row) -> Result<(), SinkError> {
        let Row::Supplier(supp) = row else {
            panic!("supplier loader fed a {} row", row.kind());
        };
        self.sink.write_row(vec![
            supp.supp_key.into(),
            supp.name.clone().into(),
            supp.address.clone().into(),
            supp.nation_key.into(),
            supp.phone.clone().into(),
            Money(supp.acctbal).into(),
            supp.comment.clone().into(),
        ])
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.sink.flush()
    }

    fn close(&mut self) -> Result<(), SinkError> {
        self.sink.close()
    }
}

pub struct CustomerLoader<S: Sink> {
    sink: S,
}

impl<S: Sink> CustomerLoader<S> {
    pub fn new(sink: S) -> Self {
        CustomerLoader { sink }
    }
}

impl<S: Sink> RowLoader for CustomerLoader<S> {
    fn load(&mut self, row: &Row) -> Result<(), SinkError> {
        let Row::Customer(cust) = row else {
            panic!("customer loader fed a {} row", row.kind());
        };
        self.sink.write_row(vec![
            cust.cust_key.into(),
            cust.name.clone().into(),
            cust.address.clone().into(),
            cust.nation_key.into(),
            cust.phone.clone().into(),
            Money(cust.acctbal).into(),
            cust.mktsegment.into(),
            cust.comment.clone().into(),
        ])
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.sink.flush()
    }

    fn close(&mut self) -> Result<(), SinkError> {
        self.sink.close()
    }
}

pub struct OrderLoader<S: Sink> {
    sink: S,
}

impl<S: Sink> OrderLoader<S> {
    pub fn new(sink: S) -> Self {
        OrderLoader { sink }
    }
}

impl<S: Sink> RowLoader for OrderLoader<S> {
    fn load(&mut self, row: &Row) -> Result<(), SinkError> {
        let Row::Order(order) = row else {
            panic!("order loader fed a {} row", row.kind());
        };
        self.sink.write_row(vec![
            order.order_key.into(),
            order.cust_key.into(),
            order.status.into(),
            Money(order.total_price).into(),
            order.date.clone().into(),
            order.priority.into(),
            order.clerk.clone().into(),
            order.ship_priority.into(),
            order.comment.clone().into(),
        ])
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.sink.flush()
    }

    fn close(&mut self) -> Result<(), SinkError> {
        self.sink.close()
    }
}

pub struct LineitemLoader<S: Sink> {
    sink: S,
}

impl<S: Sink> LineitemLoader<S> {
    pub fn new(sink: S) -> Self {
        LineitemLoader { sink }
    }
}

impl<S: Sink> RowLoader for LineitemLoader<S> {
    fn load(&mut self, row: &Row) -> Result<(), SinkError> {
        let Row::Order(order) = row else {
            panic!("lineitem loader fed a {} row", row.kind());
        };
        for line in &order.lines {
            self.sink.write_row(vec![
                line.order_key.into(),
                line.part_key.into(),
                line.supp_key.into(),
                line.line_number.into(),
                line.quantity.into(),
                Money(line.extended_price).into(),
                Money(line.discount).into(),
                Money(line.tax).into(),
                line.return_flag.into(),
                line.line_status.into(),
                line.ship_date.clone().into(),
                line.commit_date.clone().into(),
                line.receipt_date.clone().into(),
                line.ship_instruct.into(),
                line.ship_mode.into(),
                line.comment.clone().into(),
            ])?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.sink.flush()
    }

    fn close(&mut self) -> Result<(), SinkError> {
        self.sink.close()
    }
}

pub struct NationLoader<S: Sink> {
    sink: S,
}

impl<S: Sink> NationLoader<S> {
    pub fn new(sink: S) -> Self {
        NationLoader { sink }
    }
}

impl<S: Sink> RowLoader for NationLoader<S> {
    fn load(&mut self, row: &Row) -> Result<(), SinkError> {
        let Row::Nation(nation) = row else {
            panic!("nation loader fed a {} row", row.kind());
        };
        self.sink.write_row(vec![
            nation.nation_key.into(),
            nation.name.into(),
            nation.region_key.into(),
            nation.comment.clone().into(),
        ])
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.sink.flush()
    }

    fn close(&mut self) -> Result<(), SinkError> {
        self.sink.close()
    }
}

pub struct RegionLoader<S: Sink> {
    sink: S,
}

impl<S: Sink> RegionLoader<S> {
    pub fn new(sink: S) -> Self {
        RegionLoader { sink }
    }
}

impl<S: Sink> RowLoader for RegionLoader<S> {
    fn load(&mut self, row: &Row) -> Result<(), SinkError> {
        let Row::Region(region) = row else {
            panic!("region loader fed a {} row", row.kind());
        };
        self.sink.write_row(vec![
            region.region_key.into(),
            region.name.into(),
            region.comment.clone().into(),
        ])
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.sink.flush()
    }

    fn close(&mut self) -> Result<(), SinkError> {
        self.sink.close()
    }
}

/// Feeds orders and their lineitems to two sinks from one pass.
pub struct OrderLineLoader<S1: Sink, S2: Sink> {
    orders: OrderLoader<S1>,
    lines: LineitemLoader<S2>,
}

impl<S1: Sink, S2: Sink> OrderLineLoader<S1, S2> {
    pub fn new(order_sink: S1, line_sink: S2) -> Self {
        OrderLineLoader {
            orders: OrderLoader::new(order_sink),
            lines: LineitemLoader::new(line_sink),
        }
    }
}

impl<S1: Sink, S2: Sink> RowLoader for OrderLineLoader<S1, S2> {
    fn load(&mut self, row: &Row) -> Result<(), SinkError> {
        self.orders.load(row)?;
        self.lines.load(row)
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.orders.flush()?;
        self.lines.flush()
    }

    fn close(&mut self) -> Result<(), SinkError> {
        self.orders.close()?;
        self.lines.close()
    }
}

/// Feeds parts and their part-supplier entries to two sinks from one pass.
pub struct PartPsuppLoader<S1: Sink, S2: Sink> {
    parts: PartLoader<S1>,
    psupps: PartSuppLoader<S2>,
}

impl<S1: Sink, S2: Sink> PartPsuppLoader<S1, S2> {
    pub fn new(part_sink: S1, psupp_sink: S2) -> Self {
        PartPsuppLoader {
            parts: PartLoader::new(part_sink),
            psupps: PartSuppLoader::new(psupp_sink),
        }
    }
}

impl<S1: Sink, S2: Sink> RowLoader for PartPsuppLoader<S1, S2> {
    fn load(&mut self, row: &Row) -> Result<(), SinkError> {
        self.parts.load(row)?;
        self.psupps.load(row)
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.parts.flush()?;
        self.psupps.flush()
    }

    fn close(&mut self) -> Result<(), SinkError> {
        self.parts.close()?;
        self.psupps.close()
    }
}
