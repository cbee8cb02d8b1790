pub mod mtx;
pub mod similarity;
