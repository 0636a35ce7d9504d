mod helpers;
mod refunds;
mod search;
