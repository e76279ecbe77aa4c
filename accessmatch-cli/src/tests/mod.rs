//! Shared test harness modules for the accessmatch CLI.

use super::*;

mod helpers;
