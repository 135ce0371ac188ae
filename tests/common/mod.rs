//! Common test utilities and mock implementations

pub mod mock_interface;
pub mod test_utils;

pub use mock_interface::{MockError, MockInterface, Operation};
pub use test_utils::{BoardMocks, MockDelay, assert_float_eq, create_mock_imu};
