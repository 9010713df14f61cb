//! Expected failure outcomes for every mutating operation.
//!
//! None of these are exceptional: an occupied plot or an empty wallet is a
//! normal answer the caller branches on.

use thiserror::Error;

use crate::shared::{Coins, CropId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: Coins, available: Coins },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    #[error("not enough '{crop}' seeds: requested {requested}, holding {held}")]
    InsufficientQuantity {
        crop: CropId,
        requested: u32,
        held: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FarmError {
    #[error("plot {index} does not exist (farm has {len} plots)")]
    PlotOutOfRange { index: usize, len: usize },

    /// Only empty ground can be tilled.
    #[error("plot is not empty")]
    NotEmpty,

    #[error("plot already has a crop")]
    Occupied,

    #[error("no '{0}' seeds in inventory")]
    NoSeeds(CropId),

    #[error("nothing is planted here")]
    NotPlanted,

    #[error("plot was already watered today")]
    AlreadyWatered,

    #[error("crop is not ready to harvest")]
    NotReady,

    #[error("plot is already empty")]
    AlreadyEmpty,

    #[error("crop '{0}' is not in the catalog")]
    UnknownCrop(CropId),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShopError {
    #[error("crop '{0}' is not in the catalog")]
    UnknownCrop(CropId),

    #[error("'{0}' seeds are not sold in this region")]
    NotOffered(CropId),

    #[error("quantity must be at least 1")]
    ZeroQuantity,

    #[error(transparent)]
    Funds(#[from] LedgerError),
}
