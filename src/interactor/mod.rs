pub mod batch_interactor;

pub use batch_interactor::{BatchInteractor, BatchInteractorImpl, SwapSettings};
