//! HTTP request handlers for the alias service API.
//!
//! Defines all route handlers and configures the routing table.

mod health;
mod redirect;
mod urls;
mod users;

use actix_web::web;

/// Configure all application routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .service(users::signup)
            .service(users::signin)
            .service(users::signout),
    )
    .service(urls::shorten)
    .service(urls::list_aliases)
    .service(urls::delete_alias)
    .service(redirect::redirect_to_url)
    .service(health::health_check)
    .service(health::metrics_endpoint);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TEST_PASSWORD;
    use crate::metrics::AppMetrics;
    use crate::models::{AliasListResponse, ErrorResponse, ShortenResponse, SignInResponse};
    use crate::services::Shortener;
    use crate::test_utils::{signed_in_user, test_config, test_shortener};
    use actix_web::{test, App};
    use prometheus::Registry;

    async fn setup_test_app(
        shortener: Shortener,
    ) -> impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    > {
        test::init_service(
            App::new()
                .app_data(web::Data::new(shortener))
                .app_data(web::Data::new(test_config()))
                .configure(configure_routes),
        )
        .await
    }

    fn bearer(token: &str) -> (&'static str, String) {
        ("Authorization", format!("Bearer {}", token))
    }

    #[actix_rt::test]
    async fn test_health_check() {
        let app = setup_test_app(test_shortener()).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
    }

    #[actix_rt::test]
    async fn test_signup() {
        let app = setup_test_app(test_shortener()).await;

        let req = test::TestRequest::post()
            .uri("/users/signup")
            .set_json(serde_json::json!({
                "email": "aaa@bbb.com",
                "password": "password"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 201);
    }

    #[actix_rt::test]
    async fn test_signup_twice_returns_conflict() {
        let shortener = test_shortener();
        shortener.create_new_user("aaa@bbb.com", "password").unwrap();
        let app = setup_test_app(shortener).await;

        let req = test::TestRequest::post()
            .uri("/users/signup")
            .set_json(serde_json::json!({
                "email": "aaa@bbb.com",
                "password": "password"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 409);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.code, "USER_ALREADY_CREATED");
    }

    #[actix_rt::test]
    async fn test_signup_rejects_invalid_email() {
        let app = setup_test_app(test_shortener()).await;

        let req = test::TestRequest::post()
            .uri("/users/signup")
            .set_json(serde_json::json!({
                "email": "not-an-email",
                "password": "password"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 400);
    }

    #[actix_rt::test]
    async fn test_signin() {
        let shortener = test_shortener();
        shortener.create_new_user("aaa@bbb.com", TEST_PASSWORD).unwrap();
        let app = setup_test_app(shortener.clone()).await;

        let req = test::TestRequest::post()
            .uri("/users/signin")
            .set_json(serde_json::json!({
                "email": "aaa@bbb.com",
                "password": TEST_PASSWORD
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body: SignInResponse = test::read_body_json(resp).await;
        assert_eq!(shortener.authenticate(&body.token).unwrap(), "aaa@bbb.com");
    }

    #[actix_rt::test]
    async fn test_signin_with_wrong_password() {
        let shortener = test_shortener();
        shortener.create_new_user("aaa@bbb.com", TEST_PASSWORD).unwrap();
        let app = setup_test_app(shortener).await;

        let req = test::TestRequest::post()
            .uri("/users/signin")
            .set_json(serde_json::json!({
                "email": "aaa@bbb.com",
                "password": "wrong-password"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 401);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.code, "INVALID_CREDENTIALS");
    }

    #[actix_rt::test]
    async fn test_signout_revokes_token() {
        let shortener = test_shortener();
        let token = signed_in_user(&shortener, "aaa@bbb.com");
        let app = setup_test_app(shortener).await;

        let req = test::TestRequest::post()
            .uri("/users/signout")
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let req = test::TestRequest::get()
            .uri("/urls")
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);
    }

    #[actix_rt::test]
    async fn test_shorten_requires_auth() {
        let app = setup_test_app(test_shortener()).await;

        let req = test::TestRequest::post()
            .uri("/urls/shorten")
            .set_json(serde_json::json!({
                "url": "https://example.com"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 401);
    }

    #[actix_rt::test]
    async fn test_shorten_list_and_redirect() {
        let shortener = test_shortener();
        let token = signed_in_user(&shortener, "aaa@bbb.com");
        let app = setup_test_app(shortener).await;

        let req = test::TestRequest::post()
            .uri("/urls/shorten")
            .insert_header(bearer(&token))
            .set_json(serde_json::json!({
                "url": "http://g.com/loooong_url",
                "alias": "short"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);

        let body: ShortenResponse = test::read_body_json(resp).await;
        assert_eq!(body.alias, "short");
        assert_eq!(body.shortened_url, "http://localhost:8080/r/short");

        let req = test::TestRequest::get()
            .uri("/urls")
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body: AliasListResponse = test::read_body_json(resp).await;
        assert_eq!(body.total, 1);
        assert_eq!(
            body.aliases.get("short").map(String::as_str),
            Some("http://g.com/loooong_url")
        );

        let req = test::TestRequest::get().uri("/r/short").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 301);
        assert_eq!(
            resp.headers().get("Location").unwrap(),
            "http://g.com/loooong_url"
        );
    }

    #[actix_rt::test]
    async fn test_shorten_generates_alias_when_absent() {
        let shortener = test_shortener();
        let token = signed_in_user(&shortener, "aaa@bbb.com");
        let app = setup_test_app(shortener).await;

        let req = test::TestRequest::post()
            .uri("/urls/shorten")
            .insert_header(bearer(&token))
            .set_json(serde_json::json!({
                "url": "https://example.com/some/long/path"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);

        let body: ShortenResponse = test::read_body_json(resp).await;
        assert_eq!(body.alias.len(), 8);

        let req = test::TestRequest::get()
            .uri(&format!("/r/{}", body.alias))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 301);
    }

    #[actix_rt::test]
    async fn test_shorten_taken_alias_returns_conflict() {
        let shortener = test_shortener();
        shortener
            .create_new_alias("zzz@yyy.com", "http://h.com", "taken")
            .unwrap();
        let token = signed_in_user(&shortener, "aaa@bbb.com");
        let app = setup_test_app(shortener).await;

        let req = test::TestRequest::post()
            .uri("/urls/shorten")
            .insert_header(bearer(&token))
            .set_json(serde_json::json!({
                "url": "http://g.com",
                "alias": "taken"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 409);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.code, "ALIAS_ALREADY_EXISTS");
    }

    #[actix_rt::test]
    async fn test_shorten_rejects_non_http_url() {
        let shortener = test_shortener();
        let token = signed_in_user(&shortener, "aaa@bbb.com");
        let app = setup_test_app(shortener).await;

        let req = test::TestRequest::post()
            .uri("/urls/shorten")
            .insert_header(bearer(&token))
            .set_json(serde_json::json!({
                "url": "ftp://files.example.com/archive"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 400);
    }

    #[actix_rt::test]
    async fn test_redirect_unknown_alias() {
        let app = setup_test_app(test_shortener()).await;

        let req = test::TestRequest::get().uri("/r/missing").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 404);
    }

    #[actix_rt::test]
    async fn test_delete_alias_of_another_user() {
        let shortener = test_shortener();
        shortener
            .create_new_alias("aaa@bbb.com", "https://www.youtube.com/watch?v=aLHY2XgUs7U", "ferrari")
            .unwrap();
        let token = signed_in_user(&shortener, "zzz@yyy.com");
        let app = setup_test_app(shortener).await;

        let req = test::TestRequest::delete()
            .uri("/delete/ferrari")
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 403);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.code, "PERMISSION_DENIED");

        let req = test::TestRequest::get().uri("/r/ferrari").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 301);
    }

    #[actix_rt::test]
    async fn test_delete_own_alias() {
        let shortener = test_shortener();
        let token = signed_in_user(&shortener, "aaa@bbb.com");
        shortener
            .create_new_alias("aaa@bbb.com", "https://www.youtube.com/watch?v=aLHY2XgUs7U", "ferrari")
            .unwrap();
        let app = setup_test_app(shortener).await;

        // Follow once so the lookup is cached
        let req = test::TestRequest::get().uri("/r/ferrari").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 301);

        let req = test::TestRequest::delete()
            .uri("/delete/ferrari")
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let req = test::TestRequest::get()
            .uri("/urls")
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let body: AliasListResponse = test::read_body_json(resp).await;
        assert_eq!(body.total, 0);

        let req = test::TestRequest::get().uri("/r/ferrari").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
    }

    #[actix_rt::test]
    async fn test_delete_missing_alias() {
        let shortener = test_shortener();
        let token = signed_in_user(&shortener, "aaa@bbb.com");
        let app = setup_test_app(shortener).await;

        let req = test::TestRequest::delete()
            .uri("/delete/missing")
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 404);
    }

    #[actix_rt::test]
    async fn test_metrics_disabled_returns_404() {
        let app = setup_test_app(test_shortener()).await;

        let req = test::TestRequest::get().uri("/metrics").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 404);
    }

    #[actix_rt::test]
    async fn test_metrics_endpoint_counts_redirects() {
        let registry = Registry::new();
        let metrics = AppMetrics::new(&registry).unwrap();
        let shortener = test_shortener().with_metrics(metrics);
        shortener
            .create_new_alias("aaa@bbb.com", "http://g.com", "counted")
            .unwrap();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(shortener))
                .app_data(web::Data::new(test_config()))
                .app_data(web::Data::new(registry))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/r/counted").to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::get().uri("/metrics").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body = test::read_body(resp).await;
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("alias_shortener_redirects_total 1"));
        assert!(text.contains("alias_shortener_aliases_created_total 1"));
    }
}
