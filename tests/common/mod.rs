#![allow(unused_imports)]

pub use linksync_test_utils::{builders, fakes, init_tracing, wait_until, with_timeout};
