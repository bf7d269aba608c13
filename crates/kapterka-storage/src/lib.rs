// SPDX-FileCopyrightText: 2026 Kapterka Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! CSV-table persistence layer for the Kapterka request desk.
//!
//! One generic table engine ([`table::Table`]) provides id assignment,
//! filtered reads, guarded status transitions, and keyed upserts over a
//! header-led CSV file, with a full load-mutate-save cycle under a
//! store-scoped lock. The four domain stores bind the engine to a fixed
//! column layout and status vocabulary each.

pub mod access;
pub mod consumables;
pub mod repairs;
pub mod requests;
pub mod table;

pub use access::AccessStore;
pub use consumables::ConsumablesStore;
pub use repairs::RepairStore;
pub use requests::RequestStore;
pub use table::{Record, Table};
