mod maths_utils;
mod perf;
mod time_utils;

pub use maths_utils::remap;
pub use time_utils::{
    TimeUtils, approx_week_number, date_to_epoch_sec, epoch_sec_to_date, format_date, parse_date,
};

pub(crate) use maths_utils::{finite_mean, finite_min_max};
