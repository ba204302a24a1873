mod position_feed;
