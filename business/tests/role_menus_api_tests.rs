//! Collaborator tests against a mock backend.

#![cfg(not(target_arch = "wasm32"))]

use erpdesk_business::api::roles::{self, RoleMenus};
use erpdesk_business::api::{ListQuery, ResourceApi};
use erpdesk_business::menu::{MenuId, MenuTree, Permission, RoleMenuEditor, EditorPhase};
use erpdesk_business::table::JsonRecord;
use erpdesk_business::{ApiError, BusinessConfig, Session};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct TestContext {
    mock_server: MockServer,
    session: Session,
}

impl TestContext {
    async fn new() -> Self {
        let mock_server = MockServer::start().await;
        let config = BusinessConfig::new(mock_server.uri());
        let session = Session::from_config(&config).with_token("test_token");
        Self {
            mock_server,
            session,
        }
    }

    async fn mock_get(&self, route: &str, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(route))
            .and(header("authorization", "Bearer test_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.mock_server)
            .await;
    }

    async fn mock_catalog(&self) {
        self.mock_get(
            "/api/menus",
            json!({"data": [
                {"menu_id": 1, "menu_name": "Masters", "menu_code": "ACC_MASTERS", "module_code": "ACCOUNTS", "parent_menu_id": null},
                {"menu_id": "2", "menu_name": "Ledgers", "menu_code": "ACC_LEDGERS", "module_code": "ACCOUNTS", "parent_menu_id": "1"},
                {"menu_id": 3, "menu_name": "Stock", "menu_code": "INV_STOCK", "module_code": "INVENTORY"}
            ]}),
        )
        .await;
    }
}

#[tokio::test]
async fn test_list_roles_accepts_bare_array() {
    let ctx = TestContext::new().await;
    ctx.mock_get(
        "/api/roles",
        json!([
            {"role_id": 1, "role_name": "Administrator"},
            {"role_id": "2", "role_name": "Accountant", "description": "Books only"}
        ]),
    )
    .await;

    let roles = roles::list_roles(&ctx.session).await.expect("roles load");
    assert_eq!(roles.len(), 2);
    assert_eq!(roles[1].role_id, 2);
    assert_eq!(roles[1].description.as_deref(), Some("Books only"));
}

#[tokio::test]
async fn test_load_role_menus_merges_into_tree() {
    let ctx = TestContext::new().await;
    ctx.mock_catalog().await;
    ctx.mock_get(
        "/api/roles/7/menus",
        json!({"data": [
            {"menu_id": 2, "menu_name": "Ledgers", "module_code": "ACCOUNTS", "can_create": 1, "can_update": "1", "can_export": true},
            {"menu_id": 99, "menu_name": "Old Report", "module_code": "REPORTS", "can_print": "true"}
        ]}),
    )
    .await;

    let RoleMenus { catalog, assigned } = roles::load_role_menus(&ctx.session, 7)
        .await
        .expect("menus load");
    let tree = MenuTree::merge(&catalog, &assigned);

    assert_eq!(tree.len(), 4);
    assert!(!tree.node(MenuId(1)).unwrap().is_assigned());
    let ledgers = tree.node(MenuId(2)).unwrap();
    assert!(ledgers.permissions.create && ledgers.permissions.update && ledgers.permissions.export);
    assert_eq!(ledgers.parent_id, Some(MenuId(1)));
    assert!(tree.node(MenuId(99)).unwrap().permissions.print);
}

#[tokio::test]
async fn test_load_fails_when_either_call_fails() {
    let ctx = TestContext::new().await;
    ctx.mock_catalog().await;
    Mock::given(method("GET"))
        .and(path("/api/roles/7/menus"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "db down"})))
        .mount(&ctx.mock_server)
        .await;

    let err = roles::load_role_menus(&ctx.session, 7).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Status {
            status: 500,
            message: Some("db down".to_owned())
        }
    );
}

#[tokio::test]
async fn test_save_sends_every_node_in_one_request() {
    let ctx = TestContext::new().await;
    ctx.mock_catalog().await;
    ctx.mock_get("/api/roles/7/menus", json!({"data": []})).await;

    let mut editor = RoleMenuEditor::new();
    let ticket = editor.select_role(7).unwrap();
    let loaded = roles::load_role_menus(&ctx.session, 7).await;
    editor.finish_loading(ticket, loaded);
    editor.toggle(MenuId(1), Permission::Import);

    let expected = json!({"menus": [
        {"menu_id": 1, "can_create": false, "can_update": false, "can_delete": false, "can_import": true, "can_export": false, "can_print": false, "is_assigned": true},
        {"menu_id": 2, "can_create": false, "can_update": false, "can_delete": false, "can_import": true, "can_export": false, "can_print": false, "is_assigned": true},
        {"menu_id": 3, "can_create": false, "can_update": false, "can_delete": false, "can_import": false, "can_export": false, "can_print": false, "is_assigned": false}
    ]});
    Mock::given(method("PUT"))
        .and(path("/api/roles/7/menus"))
        .and(body_json(&expected))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&ctx.mock_server)
        .await;

    let request = editor.begin_save().expect("role is loaded");
    let result = roles::update_role_menus(&ctx.session, request.role_id, &request.menus).await;
    editor.finish_save(request.ticket, result);

    assert_eq!(editor.phase(), EditorPhase::Loaded { role_id: 7 });
    assert!(!editor.is_dirty());
    assert!(editor.last_error().is_none());
}

#[tokio::test]
async fn test_rejected_save_keeps_edits() {
    let ctx = TestContext::new().await;
    Mock::given(method("PUT"))
        .and(path("/api/roles/7/menus"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": false, "message": "Role is locked"})),
        )
        .mount(&ctx.mock_server)
        .await;

    let mut editor = RoleMenuEditor::new();
    let ticket = editor.select_role(7).unwrap();
    editor.finish_loading(
        ticket,
        Ok(RoleMenus {
            catalog: serde_json::from_value(json!([
                {"menu_id": 1, "menu_name": "Masters", "module_code": "ACCOUNTS"}
            ]))
            .unwrap(),
            assigned: Vec::new(),
        }),
    );
    editor.toggle(MenuId(1), Permission::Create);

    let request = editor.begin_save().unwrap();
    let result = roles::update_role_menus(&ctx.session, request.role_id, &request.menus).await;
    assert_eq!(result, Err(ApiError::Rejected("Role is locked".to_owned())));
    editor.finish_save(request.ticket, result);

    assert_eq!(editor.phase(), EditorPhase::Loaded { role_id: 7 });
    assert!(editor.is_dirty());
    assert!(editor.tree().node(MenuId(1)).unwrap().permissions.create);
    assert_eq!(editor.last_error(), Some("Role is locked"));
}

#[tokio::test]
async fn test_resource_list_passes_paging_and_search() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .and(query_param("page", "2"))
        .and(query_param("per_page", "10"))
        .and(query_param("search", "ann"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": 11, "username": "ann"}],
            "total": 57,
            "page": 2
        })))
        .mount(&ctx.mock_server)
        .await;

    let api = ResourceApi::<JsonRecord>::new("/users");
    let response = api
        .list(&ctx.session, &ListQuery::new(2, 10).with_search("ann"))
        .await
        .expect("list succeeds");

    assert_eq!(response.total_items(), 57);
    assert_eq!(response.page, Some(2));
    assert_eq!(response.data[0].get("username"), Some(&json!("ann")));
}

#[tokio::test]
async fn test_resource_mutations() {
    let ctx = TestContext::new().await;
    Mock::given(method("POST"))
        .and(path("/api/users"))
        .and(body_json(json!({"username": "bob"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": {"id": 12}})),
        )
        .mount(&ctx.mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/users/12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&ctx.mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/users/12"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": false, "message": "User has vouchers"})),
        )
        .mount(&ctx.mock_server)
        .await;

    let api = ResourceApi::<JsonRecord>::new("/users");
    let created = api
        .create(&ctx.session, &json!({"username": "bob"}))
        .await
        .expect("create succeeds");
    assert_eq!(created.data, Some(json!({"id": 12})));

    api.update(&ctx.session, 12, &json!({"username": "bobby"}))
        .await
        .expect("update succeeds");

    let err = api.delete(&ctx.session, 12).await.unwrap_err();
    assert_eq!(err.to_string(), "User has vouchers");
}

#[tokio::test]
async fn test_transport_error() {
    // nothing listens on this port
    let session = Session::new("http://127.0.0.1:9/api");
    let err = roles::list_roles(&session).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)), "{err:?}");
}
