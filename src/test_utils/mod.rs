#[cfg(test)]
pub mod mocks {
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::collections::{BTreeSet, HashMap};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use crate::domain::{
        entities::{Actor, ActorId, Film, FilmId, User, UserId},
        repositories::{ActorRepository, FilmRepository, SessionStore, UserRepository},
        value_objects::{FilmSort, Role, SortField, SortOrder},
    };
    use crate::presentation::middleware::error::AppError;

    pub fn film(id: i64, title: &str, rating: f64) -> Film {
        let released = NaiveDate::from_ymd_opt(2001, 1, 1).unwrap();
        Film::new(FilmId::new(id), title, "", released, rating).unwrap()
    }

    pub fn actor(id: i64, name: &str) -> Actor {
        let born = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        Actor::new(ActorId::new(id), name, "other", born).unwrap()
    }

    /// Insert `Actor {id}` into the catalog behind `films`
    pub fn seed_actor(films: &InMemoryFilmRepository, id: i64) {
        films.actors().insert(actor(id, &format!("Actor {id}")));
    }

    /// Shared tables behind the in-memory film and actor repositories
    #[derive(Default)]
    struct Catalog {
        films: HashMap<FilmId, Film>,
        actors: HashMap<ActorId, Actor>,
        links: BTreeSet<(FilmId, ActorId)>,
        next_film_id: i64,
        next_actor_id: i64,
    }

    impl Catalog {
        fn hydrated_film(&self, id: FilmId) -> Option<Film> {
            let mut film = self.films.get(&id)?.clone();
            for (_, actor_id) in self.links.iter().filter(|(f, _)| *f == id) {
                if let Some(actor) = self.actors.get(actor_id) {
                    film.add_actor(actor.clone());
                }
            }
            Some(film)
        }

        fn hydrated_actor(&self, id: ActorId) -> Option<Actor> {
            let mut actor = self.actors.get(&id)?.clone();
            for (film_id, _) in self.links.iter().filter(|(_, a)| *a == id) {
                if let Some(film) = self.films.get(film_id) {
                    actor.add_film(film.clone());
                }
            }
            Some(actor)
        }

        fn actor_names(&self, id: FilmId) -> impl Iterator<Item = &str> {
            self.links
                .iter()
                .filter(move |(f, _)| *f == id)
                .filter_map(|(_, a)| self.actors.get(a).map(Actor::name))
        }
    }

    /// Simple in-memory film repository for testing
    #[derive(Clone, Default)]
    pub struct InMemoryFilmRepository {
        catalog: Arc<Mutex<Catalog>>,
    }

    impl InMemoryFilmRepository {
        pub fn new() -> Self {
            Self::default()
        }

        #[must_use]
        pub fn with_film(self, film: Film) -> Self {
            {
                let mut catalog = self.catalog.lock().unwrap();
                catalog.next_film_id = catalog.next_film_id.max(film.id().as_i64());
                catalog.films.insert(film.id(), film);
            }
            self
        }

        /// Actor repository sharing this catalog
        pub fn actors(&self) -> InMemoryActorRepository {
            InMemoryActorRepository { catalog: Arc::clone(&self.catalog) }
        }

        pub fn is_empty(&self) -> bool {
            self.catalog.lock().unwrap().films.is_empty()
        }
    }

    #[async_trait]
    impl FilmRepository for InMemoryFilmRepository {
        async fn create(&self, film: &Film) -> Result<Film, AppError> {
            let mut catalog = self.catalog.lock().unwrap();
            catalog.next_film_id += 1;
            let created = film.clone().with_id(FilmId::new(catalog.next_film_id));
            catalog.films.insert(created.id(), created.clone());
            Ok(created)
        }

        async fn find_by_id(&self, id: FilmId) -> Result<Film, AppError> {
            let catalog = self.catalog.lock().unwrap();
            catalog
                .hydrated_film(id)
                .ok_or_else(|| AppError::not_found(format!("Film with ID {id}")))
        }

        async fn update(&self, film: &Film) -> Result<Film, AppError> {
            let mut catalog = self.catalog.lock().unwrap();
            let slot = catalog
                .films
                .get_mut(&film.id())
                .ok_or_else(|| AppError::not_found(format!("Film with ID {}", film.id())))?;
            *slot = film.clone();
            Ok(film.clone())
        }

        async fn delete(&self, id: FilmId) -> Result<(), AppError> {
            let mut catalog = self.catalog.lock().unwrap();
            catalog
                .films
                .remove(&id)
                .ok_or_else(|| AppError::not_found(format!("Film with ID {id}")))?;
            catalog.links.retain(|(f, _)| *f != id);
            Ok(())
        }

        async fn get_all(&self, sort: FilmSort) -> Result<Vec<Film>, AppError> {
            let catalog = self.catalog.lock().unwrap();
            let mut films: Vec<Film> =
                catalog.films.keys().filter_map(|id| catalog.hydrated_film(*id)).collect();

            films.sort_by(|a, b| {
                let ordering = match sort.field {
                    SortField::Title => a.title().cmp(b.title()),
                    SortField::Rating => a.rating().total_cmp(&b.rating()),
                    SortField::ReleaseDate => a.release_date().cmp(&b.release_date()),
                };
                let ordering = match sort.order {
                    SortOrder::Asc => ordering,
                    SortOrder::Desc => ordering.reverse(),
                };
                ordering.then(a.id().cmp(&b.id()))
            });
            Ok(films)
        }

        async fn search(&self, fragment: &str) -> Result<Vec<Film>, AppError> {
            let catalog = self.catalog.lock().unwrap();
            let needle = fragment.to_lowercase();

            let mut matches: Vec<Film> = catalog
                .films
                .values()
                .filter(|film| {
                    film.title().to_lowercase().contains(&needle)
                        || catalog
                            .actor_names(film.id())
                            .any(|name| name.to_lowercase().contains(&needle))
                })
                .cloned()
                .collect();

            matches.sort_by(|a, b| b.rating().total_cmp(&a.rating()).then(a.id().cmp(&b.id())));
            Ok(matches)
        }

        async fn replace_actors(
            &self,
            id: FilmId,
            actor_ids: &[ActorId],
        ) -> Result<Film, AppError> {
            let mut catalog = self.catalog.lock().unwrap();

            // Reject the whole replacement before touching anything.
            if actor_ids.iter().any(|a| !catalog.actors.contains_key(a)) {
                return Err(AppError::bad_request("referenced record does not exist"));
            }

            catalog.links.retain(|(f, _)| *f != id);
            for actor_id in actor_ids {
                catalog.links.insert((id, *actor_id));
            }

            catalog
                .hydrated_film(id)
                .ok_or_else(|| AppError::not_found(format!("Film with ID {id}")))
        }
    }

    /// In-memory actor repository; obtain one via [`InMemoryFilmRepository::actors`]
    #[derive(Clone, Default)]
    pub struct InMemoryActorRepository {
        catalog: Arc<Mutex<Catalog>>,
    }

    impl InMemoryActorRepository {
        #[must_use]
        pub fn with_actor(self, actor: Actor) -> Self {
            self.insert(actor);
            self
        }

        pub fn insert(&self, actor: Actor) {
            let mut catalog = self.catalog.lock().unwrap();
            catalog.next_actor_id = catalog.next_actor_id.max(actor.id().as_i64());
            catalog.actors.insert(actor.id(), actor);
        }
    }

    #[async_trait]
    impl ActorRepository for InMemoryActorRepository {
        async fn create(&self, actor: &Actor) -> Result<Actor, AppError> {
            let mut catalog = self.catalog.lock().unwrap();
            catalog.next_actor_id += 1;
            let created = actor.clone().with_id(ActorId::new(catalog.next_actor_id));
            catalog.actors.insert(created.id(), created.clone());
            Ok(created)
        }

        async fn find_by_id(&self, id: ActorId) -> Result<Actor, AppError> {
            let catalog = self.catalog.lock().unwrap();
            catalog
                .hydrated_actor(id)
                .ok_or_else(|| AppError::not_found(format!("Actor with ID {id}")))
        }

        async fn update(&self, actor: &Actor) -> Result<Actor, AppError> {
            let mut catalog = self.catalog.lock().unwrap();
            let slot = catalog
                .actors
                .get_mut(&actor.id())
                .ok_or_else(|| AppError::not_found(format!("Actor with ID {}", actor.id())))?;
            *slot = actor.clone();
            Ok(actor.clone())
        }

        async fn delete(&self, id: ActorId) -> Result<(), AppError> {
            let mut catalog = self.catalog.lock().unwrap();
            catalog
                .actors
                .remove(&id)
                .ok_or_else(|| AppError::not_found(format!("Actor with ID {id}")))?;
            catalog.links.retain(|(_, a)| *a != id);
            Ok(())
        }

        async fn get_all(&self) -> Result<Vec<Actor>, AppError> {
            let catalog = self.catalog.lock().unwrap();
            let mut ids: Vec<ActorId> = catalog.actors.keys().copied().collect();
            ids.sort_unstable();
            Ok(ids.into_iter().filter_map(|id| catalog.hydrated_actor(id)).collect())
        }
    }

    /// Users keyed by mail
    #[derive(Clone, Default)]
    pub struct InMemoryUserRepository {
        users: Arc<Mutex<HashMap<String, User>>>,
    }

    impl InMemoryUserRepository {
        pub fn new() -> Self {
            Self::default()
        }

        /// The persisted record, secrets included
        pub fn stored(&self, mail: &str) -> Option<User> {
            self.users.lock().unwrap().get(mail).cloned()
        }
    }

    #[async_trait]
    impl UserRepository for InMemoryUserRepository {
        async fn create(&self, user: &User) -> Result<UserId, AppError> {
            let mut users = self.users.lock().unwrap();
            if users.contains_key(user.mail()) {
                return Err(AppError::Conflict { message: "already exists".to_string() });
            }
            let id = i64::try_from(users.len()).unwrap() + 1;
            let stored = User::new(id, user.name(), user.mail(), user.password(), user.salt(), user.role().as_i32())?;
            users.insert(user.mail().to_string(), stored);
            Ok(UserId::new(id))
        }

        async fn find_by_mail(&self, mail: &str) -> Result<User, AppError> {
            self.users.lock().unwrap().get(mail).cloned().ok_or_else(|| AppError::not_found("user"))
        }
    }

    /// Session store without expiry
    #[derive(Clone, Default)]
    pub struct InMemorySessionStore {
        sessions: Arc<Mutex<HashMap<String, Role>>>,
    }

    impl InMemorySessionStore {
        pub fn new() -> Self {
            Self::default()
        }

        #[must_use]
        pub fn with_session(self, session_id: &str, role: Role) -> Self {
            self.sessions.lock().unwrap().insert(session_id.to_string(), role);
            self
        }

        pub fn len(&self) -> usize {
            self.sessions.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl SessionStore for InMemorySessionStore {
        async fn set(&self, session_id: &str, role: Role, _ttl: Duration) -> Result<(), AppError> {
            self.sessions.lock().unwrap().insert(session_id.to_string(), role);
            Ok(())
        }

        async fn get(&self, session_id: &str) -> Result<Role, AppError> {
            self.sessions
                .lock()
                .unwrap()
                .get(session_id)
                .copied()
                .ok_or_else(|| AppError::not_found("session"))
        }

        async fn delete(&self, session_id: &str) -> Result<(), AppError> {
            self.sessions.lock().unwrap().remove(session_id);
            Ok(())
        }
    }
}
