use std::{collections::BTreeMap, sync::Arc};

use axum::{
    body::Bytes,
    extract::{FromRequest, Path, Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use prost::Message;
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

pub mod messages;

pub use messages::{Header, TestCase, TestCaseList, TestSuite, TestSuiteList};

use messages::named;

pub const PROTOBUF_CONTENT_TYPE: &str = "application/x-protobuf";

/// Protobuf body extractor and response, the binary counterpart of `Json`.
pub struct Proto<T>(pub T);

impl<T: Message> IntoResponse for Proto<T> {
    fn into_response(self) -> Response {
        (
            [(header::CONTENT_TYPE, PROTOBUF_CONTENT_TYPE)],
            self.0.encode_to_vec(),
        )
            .into_response()
    }
}

impl<T, S> FromRequest<S> for Proto<T>
where
    T: Message + Default,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;
        T::decode(body).map(Proto).map_err(|e| {
            let reason = format!("invalid {}: {e}", std::any::type_name::<T>());
            (StatusCode::UNPROCESSABLE_ENTITY, reason).into_response()
        })
    }
}

/// In-memory tables keyed by id. Ordered so list responses are stable.
#[derive(Debug, Clone, Default)]
pub struct Store {
    test_cases: BTreeMap<u32, TestCase>,
    suites: BTreeMap<u32, TestSuite>,
}

impl Store {
    /// Fixtures matching the backend the client demos were written against.
    pub fn demo() -> Self {
        let mut store = Store::default();
        let names = [
            "CAM-main_MODE-photo_ASPECT_RATIO-43_FLASH-off_ZOOM-1.0",
            "CAM-main_MODE-photo_ASPECT_RATIO-169_FLASH-off_ZOOM-1.0",
            "CAM-front_MODE-photo_ASPECT_RATIO-43_FLASH-auto_ZOOM-1.0",
            "CAM-main_MODE-video_ASPECT_RATIO-169_FLASH-off_ZOOM-1.0",
            "CAM-main_MODE-photo_ASPECT_RATIO-916_FLASH-on_ZOOM-1.5",
            "CAM-main_MODE-portrait_ASPECT_RATIO-916_FLASH-on_ZOOM-2.0",
        ];
        for (id, name) in (1..).zip(names) {
            store.insert_test_case(TestCase {
                id,
                name: name.to_string(),
                moves_list: vec![
                    named(1, "home"),
                    named(2, "open_camera"),
                    named(10, "picture_variation_0"),
                ],
            });
        }
        store.insert_suite(TestSuite {
            id: 1,
            name: "Smoke Test Suite".to_string(),
            tests_cases: vec![named(1, names[0]), named(2, names[1])],
        });
        store
    }

    pub fn insert_test_case(&mut self, test_case: TestCase) {
        self.test_cases.insert(test_case.id, test_case);
    }

    pub fn insert_suite(&mut self, suite: TestSuite) {
        self.suites.insert(suite.id, suite);
    }
}

pub type Db = Arc<RwLock<Store>>;

/// A stored message type and the routes that serve it.
trait Entity: Message + Default + Clone + 'static {
    const KIND: &'static str;
    const PREFIX: &'static str;
    type List: Message;

    fn table(store: &Store) -> &BTreeMap<u32, Self>;
    fn table_mut(store: &mut Store) -> &mut BTreeMap<u32, Self>;
    fn set_id(&mut self, id: u32);
    fn list(items: Vec<Self>) -> Self::List;
}

impl Entity for TestCase {
    const KIND: &'static str = "test case";
    const PREFIX: &'static str = "/database/test-case";
    type List = TestCaseList;

    fn table(store: &Store) -> &BTreeMap<u32, Self> {
        &store.test_cases
    }

    fn table_mut(store: &mut Store) -> &mut BTreeMap<u32, Self> {
        &mut store.test_cases
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    fn list(test_cases: Vec<Self>) -> TestCaseList {
        TestCaseList { test_cases }
    }
}

impl Entity for TestSuite {
    const KIND: &'static str = "suite";
    const PREFIX: &'static str = "/database/suite";
    type List = TestSuiteList;

    fn table(store: &Store) -> &BTreeMap<u32, Self> {
        &store.suites
    }

    fn table_mut(store: &mut Store) -> &mut BTreeMap<u32, Self> {
        &mut store.suites
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    fn list(test_suites: Vec<Self>) -> TestSuiteList {
        TestSuiteList { test_suites }
    }
}

pub fn app() -> Router {
    router(Store::default())
}

pub fn router(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .merge(routes::<TestCase>())
        .merge(routes::<TestSuite>())
        .with_state(db)
}

pub async fn run(listener: TcpListener, store: Store) -> Result<(), std::io::Error> {
    axum::serve(listener, router(store)).await
}

fn routes<E: Entity>() -> Router<Db> {
    let prefix = E::PREFIX;
    Router::new()
        .route(&format!("{prefix}/list"), get(list::<E>))
        .route(&format!("{prefix}/create"), post(create::<E>))
        .route(&format!("{prefix}/{{id}}"), get(get_one::<E>).delete(delete::<E>))
        .route(&format!("{prefix}/update/{{id}}"), put(update::<E>))
}

fn not_found<E: Entity>(id: u32) -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, format!("{} {id} not found", E::KIND))
}

async fn list<E: Entity>(State(db): State<Db>) -> Proto<E::List> {
    let store = db.read().await;
    Proto(E::list(E::table(&store).values().cloned().collect()))
}

async fn get_one<E: Entity>(
    State(db): State<Db>,
    Path(id): Path<u32>,
) -> Result<Proto<E>, (StatusCode, String)> {
    let store = db.read().await;
    E::table(&store)
        .get(&id)
        .cloned()
        .map(Proto)
        .ok_or_else(|| not_found::<E>(id))
}

async fn create<E: Entity>(
    State(db): State<Db>,
    Proto(mut entity): Proto<E>,
) -> Result<(StatusCode, Proto<E>), (StatusCode, String)> {
    let mut store = db.write().await;
    let table = E::table_mut(&mut store);
    let id = match table.keys().next_back() {
        None => 1,
        Some(last) => last.checked_add(1).ok_or_else(|| {
            (StatusCode::CONFLICT, format!("no {} ids left after {last}", E::KIND))
        })?,
    };
    entity.set_id(id);
    table.insert(id, entity.clone());
    info!("created {} {id}", E::KIND);
    Ok((StatusCode::CREATED, Proto(entity)))
}

async fn update<E: Entity>(
    State(db): State<Db>,
    Path(id): Path<u32>,
    Proto(mut entity): Proto<E>,
) -> Result<Proto<E>, (StatusCode, String)> {
    let mut store = db.write().await;
    let slot = E::table_mut(&mut store)
        .get_mut(&id)
        .ok_or_else(|| not_found::<E>(id))?;
    entity.set_id(id);
    *slot = entity.clone();
    Ok(Proto(entity))
}

async fn delete<E: Entity>(
    State(db): State<Db>,
    Path(id): Path<u32>,
) -> Result<String, (StatusCode, String)> {
    let mut store = db.write().await;
    E::table_mut(&mut store)
        .remove(&id)
        .ok_or_else(|| not_found::<E>(id))?;
    info!("deleted {} {id}", E::KIND);
    Ok(format!("deleted {} {id}", E::KIND))
}
