mod common;
mod fees;
mod visibility;
