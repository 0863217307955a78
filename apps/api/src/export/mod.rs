//! Report export. Peripheral to screening; reads whatever the store holds.

pub mod csv_report;
