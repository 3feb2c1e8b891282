pub const IDENTIFY_PLANT: &str = include_str!("../data/prompts/identify_plant.txt");
