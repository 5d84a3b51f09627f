mod customer;
mod dist;
mod dist_data;
mod driver;
mod loader;
mod misc;
mod nation;
mod order;
mod part;
mod region;
mod stream;
mod supplier;
mod text;

pub mod prelude {
    pub use super::customer::Customer;
    pub use super::dist::{shared_distributions, Distribution, Distributions};
    pub use super::driver::{
        Generator, Row, Rows, Table, CUSTOMER_BASE, NATION_COUNT, ORDERS_BASE,
        ORDERS_PER_CUSTOMER, PART_BASE, REGION_COUNT, SUPPLIER_BASE,
    };
    pub use super::loader::{
        CustomerLoader, LineitemLoader, NationLoader, OrderLineLoader, OrderLoader,
        PartLoader, PartPsuppLoader, PartSuppLoader, RegionLoader, RowLoader,
        SupplierLoader, CUSTOMER_COLUMNS, LINEITEM_COLUMNS, NATION_COLUMNS,
        ORDERS_COLUMNS, PARTSUPP_COLUMNS, PART_COLUMNS, REGION_COLUMNS,
        SUPPLIER_COLUMNS,
    };
    pub use super::misc::{julian, retail_price, sparse_key, AsciiDates, Money};
    pub use super::nation::Nation;
    pub use super::order::{Lineitem, Order};
    pub use super::part::{part_supp_bridge, Part, PartSupp, SUPP_PER_PART};
    pub use super::region::Region;
    pub use super::stream::{StreamOwner, StreamSet, NUM_STREAMS};
    pub use super::supplier::Supplier;
    pub use super::text::{reference_pool, TextPool, TEXT_POOL_SIZE};
}
