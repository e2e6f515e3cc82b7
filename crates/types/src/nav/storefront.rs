use super::{MegaGroup, NavData, NavLink, NavSection};

impl NavData {
    /// The built-in storefront navigation used when no navigation file is configured.
    pub fn storefront() -> Self {
        Self {
            brand: "ÉVOQUE".to_string(),
            primary: Vec::new(),
            mega: vec![
                MegaGroup::new(
                    "Home",
                    vec![NavSection::new(
                        "Explore",
                        vec![NavLink::new("Overview", "/").with_description("Start here")],
                    )],
                ),
                MegaGroup::new(
                    "Collections",
                    vec![
                        NavSection::new(
                            "Browse",
                            vec![
                                NavLink::new("All Collections", "/collections").with_description("Curated sets"),
                                NavLink::new("Best Sellers", "/collections/best-sellers").with_description("Most-loved picks"),
                                NavLink::new("Staff Picks", "/collections/staff-picks").with_description("Hand-selected"),
                            ],
                        ),
                        NavSection::new(
                            "By Category",
                            vec![
                                NavLink::new("Electronics", "/collections/electronics").with_description("Gadgets & gear"),
                                NavLink::new("Home & Living", "/collections/home-living").with_description("Daily essentials"),
                                NavLink::new("Fitness", "/collections/fitness").with_description("Train smart"),
                            ],
                        ),
                        NavSection::new(
                            "Price Tiers",
                            vec![
                                NavLink::new("Under $50", "/collections/under-50").with_description("Budget wins"),
                                NavLink::new("$50–$150", "/collections/50-150").with_description("Mid-range"),
                                NavLink::new("Premium", "/collections/premium").with_description("Top shelf"),
                            ],
                        ),
                    ],
                ),
                MegaGroup::new(
                    "New",
                    vec![
                        NavSection::new(
                            "Latest",
                            vec![
                                NavLink::new("New Arrivals", "/new").with_description("Fresh drops"),
                                NavLink::new("Just Restocked", "/new/restocked").with_description("Back in stock"),
                            ],
                        ),
                        NavSection::new(
                            "Coming Soon",
                            vec![
                                NavLink::new("Sneak Peek", "/new/coming-soon").with_description("Preview the queue"),
                                NavLink::new("Waitlist", "/new/waitlist").with_description("Get notified"),
                            ],
                        ),
                        NavSection::new(
                            "Spotlight",
                            vec![
                                NavLink::new("Editor’s Picks", "/new/editors-picks").with_description("Our favorites"),
                                NavLink::new("Limited Edition", "/new/limited").with_description("Short run releases"),
                            ],
                        ),
                    ],
                ),
            ],
            quick_links: vec![
                NavLink::new("Changelog", "/changelog"),
                NavLink::new("Blog", "/blog"),
                NavLink::new("Support", "/support"),
            ],
        }
    }
}
