mod access;
mod aggregation;
mod persistence;
mod ranking;
mod storage_failure;
mod submission;
