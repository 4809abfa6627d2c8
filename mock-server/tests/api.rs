use axum::body::Body;
use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, router, Header, Store, TestCase, TestCaseList, TestSuite, TestSuiteList};
use prost::Message;
use tower::ServiceExt;

async fn body_proto<T: Message + Default>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    T::decode(bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn proto_request(method: &str, uri: &str, message: &impl Message) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, mock_server::PROTOBUF_CONTENT_TYPE)
        .body(Body::from(message.encode_to_vec()))
        .unwrap()
}

fn header(id: u32, name: &str) -> Header {
    Header {
        id,
        name: name.to_string(),
    }
}

// --- list ---

#[tokio::test]
async fn list_test_cases_empty() {
    let resp = app().oneshot(get("/database/test-case/list")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()[http::header::CONTENT_TYPE],
        mock_server::PROTOBUF_CONTENT_TYPE
    );
    let list: TestCaseList = body_proto(resp).await;
    assert!(list.test_cases.is_empty());
}

#[tokio::test]
async fn list_demo_test_cases_in_id_order() {
    let resp = router(Store::demo())
        .oneshot(get("/database/test-case/list"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let list: TestCaseList = body_proto(resp).await;
    let ids: Vec<u32> = list.test_cases.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
}

// --- create ---

#[tokio::test]
async fn create_suite_returns_201_with_assigned_id() {
    let draft = TestSuite {
        id: 0,
        name: "Validation Test Suite".to_string(),
        tests_cases: vec![header(5, "photo"), header(6, "portrait")],
    };
    let resp = router(Store::demo())
        .oneshot(proto_request("POST", "/database/suite/create", &draft))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: TestSuite = body_proto(resp).await;
    assert_eq!(created.id, 2);
    assert_eq!(created.name, draft.name);
    assert_eq!(created.tests_cases, draft.tests_cases);
}

#[tokio::test]
async fn create_malformed_body_returns_422() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/database/test-case/create")
                .body(Body::from(vec![0xffu8, 0xff, 0xff]))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn create_after_max_id_returns_409() {
    let mut store = Store::default();
    store.insert_test_case(TestCase {
        id: u32::MAX,
        name: "last".to_string(),
        moves_list: Vec::new(),
    });
    let resp = router(store)
        .oneshot(proto_request(
            "POST",
            "/database/test-case/create",
            &TestCase::default(),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body = body_bytes(resp).await;
    assert_eq!(
        &body[..],
        format!("no test case ids left after {}", u32::MAX).as_bytes()
    );
}

// --- get ---

#[tokio::test]
async fn get_test_case_not_found() {
    let resp = app().oneshot(get("/database/test-case/999")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_bytes(resp).await;
    assert_eq!(&body[..], b"test case 999 not found");
}

#[tokio::test]
async fn get_test_case_bad_id_returns_400() {
    let resp = app().oneshot(get("/database/test-case/abc")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- update ---

#[tokio::test]
async fn update_suite_not_found() {
    let resp = app()
        .oneshot(proto_request(
            "PUT",
            "/database/suite/update/1",
            &TestSuite::default(),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_keeps_path_id() {
    let body = TestCase {
        id: 42,
        name: "renamed".to_string(),
        moves_list: vec![header(11, "picture_variation_1")],
    };
    let resp = router(Store::demo())
        .oneshot(proto_request("PUT", "/database/test-case/update/3", &body))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let updated: TestCase = body_proto(resp).await;
    assert_eq!(updated.id, 3);
    assert_eq!(updated.name, "renamed");
}

// --- delete ---

#[tokio::test]
async fn delete_suite_not_found() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/database/suite/7")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full lifecycle ---

#[tokio::test]
async fn test_case_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create
    let draft = TestCase {
        id: 0,
        name: "CAM-main_MODE-photo_ASPECT_RATIO-916_FLASH-on_ZOOM-1.5".to_string(),
        moves_list: vec![header(1, "home"), header(2, "shutter")],
    };
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(proto_request("POST", "/database/test-case/create", &draft))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: TestCase = body_proto(resp).await;
    assert_eq!(created.id, 1);
    let id = created.id;

    // get
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get(&format!("/database/test-case/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: TestCase = body_proto(resp).await;
    assert_eq!(fetched, created);

    // update — append a move
    let mut changed = fetched.clone();
    changed.moves_list.push(header(11, "picture_variation_1"));
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(proto_request(
            "PUT",
            &format!("/database/test-case/update/{id}"),
            &changed,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: TestCase = body_proto(resp).await;
    assert_eq!(updated.moves_list.len(), 3);

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(
            Request::builder()
                .method("DELETE")
                .uri(&format!("/database/test-case/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_bytes(resp).await;
    assert_eq!(&body[..], format!("deleted test case {id}").as_bytes());

    // list after delete — empty
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/database/test-case/list"))
        .await
        .unwrap();
    let list: TestCaseList = body_proto(resp).await;
    assert!(list.test_cases.is_empty());

    // suites are a separate table
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/database/suite/list"))
        .await
        .unwrap();
    let suites: TestSuiteList = body_proto(resp).await;
    assert!(suites.test_suites.is_empty());
}
