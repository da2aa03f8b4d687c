pub mod weekday;
