use coinset_core::CatalogEntry;

pub const BTC: u64 = 1;
pub const ETH: u64 = 2;
pub const ZERO: u64 = 3;
pub const SHORT: u64 = 4;
pub const TIMEOUT: u64 = 98;
pub const FAIL: u64 = 99;

pub fn entries() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::new("BTC", BTC),
        CatalogEntry::new("ETH", ETH),
        CatalogEntry::new("ZERO", ZERO),
        CatalogEntry::new("SHORT", SHORT),
        CatalogEntry::new("TIMEOUT", TIMEOUT),
        CatalogEntry::new("FAIL", FAIL),
    ]
}
