mod read_status;

pub use read_status::{ReadStatusStore, StoreError};
