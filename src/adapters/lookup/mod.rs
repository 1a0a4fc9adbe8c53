pub mod twitter_lookup;
