mod listings_api;
