use chrono::NaiveDate;
use film_library::domain::entities::{Actor, ActorId, Film, FilmId};

pub struct FilmBuilder {
    id: i64,
    title: String,
    description: String,
    release_date: NaiveDate,
    rating: f64,
}

impl FilmBuilder {
    pub fn new() -> Self {
        Self {
            id: 0,
            title: "Stalker".to_string(),
            description: String::new(),
            release_date: NaiveDate::from_ymd_opt(1979, 5, 25).unwrap(),
            rating: 8.0,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    pub fn build(self) -> Film {
        Film::new(FilmId::new(self.id), self.title, self.description, self.release_date, self.rating)
            .unwrap()
    }
}

pub struct ActorBuilder {
    id: i64,
    name: String,
    gender: String,
    birth_date: NaiveDate,
}

impl ActorBuilder {
    pub fn new() -> Self {
        Self {
            id: 0,
            name: "Anatoly Solonitsyn".to_string(),
            gender: "male".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1934, 8, 30).unwrap(),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn build(self) -> Actor {
        Actor::new(ActorId::new(self.id), self.name, &self.gender, self.birth_date).unwrap()
    }
}
