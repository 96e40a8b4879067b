/// A single position sample.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Fix {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: f64, // In meters
}

impl Fix {
    pub fn new(latitude: f64, longitude: f64, accuracy: f64) -> Self {
        Fix { latitude, longitude, accuracy }
    }
}
