pub mod bidding_utils;
