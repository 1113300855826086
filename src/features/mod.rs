mod account;
mod store;

pub use self::{
    account::{Account, AccountError},
    store::{Store, StoreError},
};
