mod failures;
mod isolation;
mod live;
mod standard_suite;
