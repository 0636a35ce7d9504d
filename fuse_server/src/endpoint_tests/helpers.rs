use actix_web::{body::MessageBody, http::StatusCode, test, test::TestRequest, web::ServiceConfig, App};
use log::debug;
use serde::Serialize;

pub async fn make_request(req: TestRequest, configure: fn(&mut ServiceConfig)) -> Result<(StatusCode, String), String> {
    let app = App::new().configure(configure);
    let service = test::init_service(app).await;
    debug!("Making request");
    let (_, res) = test::try_call_service(&service, req.to_request()).await.map_err(|e| e.to_string())?.into_parts();
    let status = res.status();
    let body = String::from_utf8_lossy(&res.into_body().try_into_bytes().unwrap()).into_owned();
    Ok((status, body))
}

pub async fn get_request(path: &str, configure: fn(&mut ServiceConfig)) -> Result<(StatusCode, String), String> {
    make_request(TestRequest::get().uri(path), configure).await
}

pub async fn post_form<T: Serialize>(
    path: &str,
    form: &T,
    configure: fn(&mut ServiceConfig),
) -> Result<(StatusCode, String), String> {
    make_request(TestRequest::post().uri(path).set_form(form), configure).await
}

pub async fn post_json<T: Serialize>(
    path: &str,
    body: &T,
    configure: fn(&mut ServiceConfig),
) -> Result<(StatusCode, String), String> {
    make_request(TestRequest::post().uri(path).set_json(body), configure).await
}
