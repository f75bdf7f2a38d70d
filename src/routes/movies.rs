use super::ApiError;
use crate::{
    interfaces::{movies::Movie, SimpleMessage},
    responders::cors::Cors,
    services::{cors_service::CorsDecision, movie_service::MovieService},
    validators::movie::{validate_movie, validate_partial_movie},
};
use rocket::{
    delete, get, options, patch, post,
    response::status,
    routes,
    serde::json::{Json, Value},
    Route, State,
};

pub fn routes() -> Vec<Route> {
    routes![list, get, create, update, delete, preflight]
}

#[get("/?<genre>")]
async fn list(
    movie_service: &State<MovieService>,
    cors: CorsDecision,
    genre: Option<&str>,
) -> Cors<Json<Vec<Movie>>> {
    // `?genre=` filters nothing
    let genre = genre.filter(|genre| !genre.is_empty());
    let movies = movie_service.list_movies(genre).await;

    Cors::new(cors, Json(movies))
}

#[get("/<movie_id>")]
async fn get(
    movie_service: &State<MovieService>,
    cors: CorsDecision,
    movie_id: &str,
) -> Cors<Result<Json<Movie>, ApiError>> {
    let movie = movie_service
        .get_movie(movie_id)
        .await
        .map(Json)
        .ok_or(ApiError::MovieNotFound);

    Cors::new(cors, movie)
}

#[post("/", data = "<body>")]
async fn create(
    movie_service: &State<MovieService>,
    body: Json<Value>,
) -> Result<status::Created<Json<Movie>>, ApiError> {
    let movie = validate_movie(&body)?;
    let movie = movie_service.create_movie(movie).await;

    log::debug!("created movie `{}`", movie.id);

    Ok(status::Created::new(format!("/movies/{}", movie.id)).body(Json(movie)))
}

#[patch("/<movie_id>", data = "<body>")]
async fn update(
    movie_service: &State<MovieService>,
    movie_id: &str,
    body: Json<Value>,
) -> Result<Json<Movie>, ApiError> {
    let movie = validate_partial_movie(&body)?;
    let movie = match movie_service.update_movie(movie_id, movie).await {
        Some(movie) => movie,
        None => {
            return Err(ApiError::MovieNotFound);
        }
    };

    log::debug!("updated movie `{movie_id}`");

    Ok(Json(movie))
}

#[delete("/<movie_id>")]
async fn delete(
    movie_service: &State<MovieService>,
    cors: CorsDecision,
    movie_id: &str,
) -> Cors<Result<Json<SimpleMessage>, ApiError>> {
    if !movie_service.delete_movie(movie_id).await {
        return Cors::new(cors, Err(ApiError::MovieNotFound));
    }

    log::debug!("deleted movie `{movie_id}`");

    Cors::new(cors, Ok(Json(SimpleMessage::new("Movie deleted"))))
}

#[options("/<_>")]
fn preflight(cors: CorsDecision) -> Cors<()> {
    Cors::preflight(cors, ())
}

#[cfg(test)]
mod tests {
    use crate::{build, config::AppConfig, db::dataset::Dataset};
    use rocket::{
        http::{Header, Status},
        local::blocking::Client,
    };
    use serde_json::{json, Value};

    const SHAWSHANK_ID: &str = "dcdd0fad-a94c-4810-8acc-5f108d3b18c3";
    const MISSING_ID: &str = "00000000-0000-4000-8000-000000000000";

    fn client() -> Client {
        let dataset = Dataset::load(None).expect("bundled dataset");
        Client::tracked(build(&AppConfig::default(), dataset)).expect("valid rocket instance")
    }

    fn movies(client: &Client) -> Vec<Value> {
        client
            .get("/movies")
            .dispatch()
            .into_json::<Vec<Value>>()
            .expect("movie list")
    }

    fn ids(movies: &[Value]) -> Vec<String> {
        movies
            .iter()
            .map(|movie| movie["id"].as_str().unwrap().to_owned())
            .collect()
    }

    fn new_movie() -> Value {
        json!({
            "title": "X",
            "genre": ["Drama"],
            "year": 2020,
            "director": "D",
            "duration": 100,
            "rate": 7.5,
            "poster": "http://x/p.jpg"
        })
    }

    #[test]
    fn index_says_hello() {
        let client = client();
        let response = client.get("/").dispatch();

        assert_eq!(response.status(), Status::Ok);
        assert_eq!(
            response.into_json::<Value>(),
            Some(json!({ "message": "hola mundo" }))
        );
    }

    #[test]
    fn list_returns_whole_collection() {
        let client = client();
        let expected = Dataset::load(None).unwrap().into_movies().len();

        let response = client.get("/movies").dispatch();
        assert_eq!(response.status(), Status::Ok);
        assert_eq!(response.into_json::<Vec<Value>>().unwrap().len(), expected);
    }

    #[test]
    fn genre_filter_ignores_case() {
        let client = client();

        let lower = client
            .get("/movies?genre=drama")
            .dispatch()
            .into_json::<Vec<Value>>()
            .unwrap();
        let upper = client
            .get("/movies?genre=DRAMA")
            .dispatch()
            .into_json::<Vec<Value>>()
            .unwrap();

        assert!(!lower.is_empty());
        assert_eq!(lower, upper);
        assert!(lower.len() < movies(&client).len());
        assert!(lower
            .iter()
            .all(|movie| movie["genre"].as_array().unwrap().contains(&json!("Drama"))));
    }

    #[test]
    fn unknown_or_empty_genre() {
        let client = client();

        let none = client
            .get("/movies?genre=western")
            .dispatch()
            .into_json::<Vec<Value>>()
            .unwrap();
        assert!(none.is_empty());

        let all = client
            .get("/movies?genre=")
            .dispatch()
            .into_json::<Vec<Value>>()
            .unwrap();
        assert_eq!(all.len(), movies(&client).len());
    }

    #[test]
    fn get_by_id() {
        let client = client();
        let response = client.get(format!("/movies/{SHAWSHANK_ID}")).dispatch();

        assert_eq!(response.status(), Status::Ok);
        let movie = response.into_json::<Value>().unwrap();
        assert_eq!(movie["id"], SHAWSHANK_ID);
        assert_eq!(movie["title"], "The Shawshank Redemption");
    }

    #[test]
    fn get_missing_movie_is_not_found() {
        let client = client();
        let missing = format!("/movies/{MISSING_ID}");

        for uri in ["/movies/doesnotexist", missing.as_str()] {
            let response = client.get(uri).dispatch();
            assert_eq!(response.status(), Status::NotFound);
            assert_eq!(
                response.into_json::<Value>(),
                Some(json!({ "message": "Movie not found" }))
            );
        }
    }

    #[test]
    fn create_assigns_new_id() {
        let client = client();
        let before = ids(&movies(&client));

        let response = client.post("/movies").json(&new_movie()).dispatch();
        assert_eq!(response.status(), Status::Created);

        let location = response.headers().get_one("Location").map(str::to_owned);
        let mut created = response.into_json::<Value>().unwrap();
        let id = created["id"].as_str().unwrap().to_owned();

        assert!(!before.contains(&id));
        assert!(ids(&movies(&client)).contains(&id));
        assert_eq!(location, Some(format!("/movies/{id}")));

        created.as_object_mut().unwrap().remove("id");
        assert_eq!(created, new_movie());
    }

    #[test]
    fn created_movie_is_readable() {
        let client = client();
        let created = client
            .post("/movies")
            .json(&new_movie())
            .dispatch()
            .into_json::<Value>()
            .unwrap();
        let id = created["id"].as_str().unwrap();

        let fetched = client
            .get(format!("/movies/{id}"))
            .dispatch()
            .into_json::<Value>()
            .unwrap();
        assert_eq!(fetched, created);
    }

    #[test]
    fn create_ignores_client_id() {
        let client = client();
        let mut body = new_movie();
        body["id"] = json!(SHAWSHANK_ID);

        let created = client
            .post("/movies")
            .json(&body)
            .dispatch()
            .into_json::<Value>()
            .unwrap();
        assert_ne!(created["id"], SHAWSHANK_ID);
    }

    #[test]
    fn create_with_missing_field_is_rejected() {
        let client = client();
        let before = movies(&client).len();

        for field in [
            "title", "genre", "year", "director", "duration", "rate", "poster",
        ] {
            let mut body = new_movie();
            body.as_object_mut().unwrap().remove(field);

            let response = client.post("/movies").json(&body).dispatch();
            assert_eq!(response.status(), Status::BadRequest, "{field}");

            let error = response.into_json::<Value>().unwrap();
            let violations = error["error"].as_array().unwrap();
            assert_eq!(violations.len(), 1);
            assert_eq!(violations[0]["field"], field);
            assert_eq!(violations[0]["code"], "required");
        }

        assert_eq!(movies(&client).len(), before);
    }

    #[test]
    fn create_with_invalid_values_reports_each_field() {
        let client = client();
        let mut body = new_movie();
        body["year"] = json!(1500);
        body["poster"] = json!("poster.jpg");

        let response = client.post("/movies").json(&body).dispatch();
        assert_eq!(response.status(), Status::BadRequest);

        let error = response.into_json::<Value>().unwrap();
        let fields: Vec<&str> = error["error"]
            .as_array()
            .unwrap()
            .iter()
            .map(|violation| violation["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, vec!["year", "poster"]);
    }

    #[test]
    fn malformed_json_is_bad_request() {
        let client = client();
        let before = movies(&client).len();

        let response = client
            .post("/movies")
            .header(rocket::http::ContentType::JSON)
            .body("{ \"title\": ")
            .dispatch();

        assert_eq!(response.status(), Status::BadRequest);
        assert_eq!(movies(&client).len(), before);
    }

    #[test]
    fn patch_merges_fields() {
        let client = client();
        let original = client
            .get(format!("/movies/{SHAWSHANK_ID}"))
            .dispatch()
            .into_json::<Value>()
            .unwrap();

        let response = client
            .patch(format!("/movies/{SHAWSHANK_ID}"))
            .json(&json!({ "year": 2021 }))
            .dispatch();
        assert_eq!(response.status(), Status::Ok);

        let mut expected = original.clone();
        expected["year"] = json!(2021);
        assert_eq!(response.into_json::<Value>().unwrap(), expected);

        let fetched = client
            .get(format!("/movies/{SHAWSHANK_ID}"))
            .dispatch()
            .into_json::<Value>()
            .unwrap();
        assert_eq!(fetched, expected);
    }

    #[test]
    fn patch_keeps_id() {
        let client = client();
        let response = client
            .patch(format!("/movies/{SHAWSHANK_ID}"))
            .json(&json!({ "id": MISSING_ID, "title": "Renamed" }))
            .dispatch();

        let movie = response.into_json::<Value>().unwrap();
        assert_eq!(movie["id"], SHAWSHANK_ID);
        assert_eq!(movie["title"], "Renamed");
    }

    #[test]
    fn empty_patch_returns_record_unchanged() {
        let client = client();
        let original = client
            .get(format!("/movies/{SHAWSHANK_ID}"))
            .dispatch()
            .into_json::<Value>()
            .unwrap();

        let response = client
            .patch(format!("/movies/{SHAWSHANK_ID}"))
            .json(&json!({}))
            .dispatch();

        assert_eq!(response.status(), Status::Ok);
        assert_eq!(response.into_json::<Value>().unwrap(), original);
    }

    #[test]
    fn patch_with_invalid_body_is_rejected() {
        let client = client();
        let before = movies(&client);

        let response = client
            .patch(format!("/movies/{SHAWSHANK_ID}"))
            .json(&json!({ "rate": 11 }))
            .dispatch();

        assert_eq!(response.status(), Status::BadRequest);
        let error = response.into_json::<Value>().unwrap();
        assert_eq!(error["error"][0]["field"], "rate");
        assert_eq!(error["error"][0]["code"], "too_big");
        assert_eq!(movies(&client), before);
    }

    #[test]
    fn patch_missing_movie_is_not_found() {
        let client = client();
        let before = movies(&client);
        let missing = format!("/movies/{MISSING_ID}");

        for uri in ["/movies/doesnotexist", missing.as_str()] {
            let response = client.patch(uri).json(&json!({ "year": 2021 })).dispatch();
            assert_eq!(response.status(), Status::NotFound);
            assert_eq!(
                response.into_json::<Value>(),
                Some(json!({ "message": "Movie not found" }))
            );
        }

        assert_eq!(movies(&client), before);
    }

    #[test]
    fn delete_removes_movie() {
        let client = client();
        let before = movies(&client).len();

        let response = client.delete(format!("/movies/{SHAWSHANK_ID}")).dispatch();
        assert_eq!(response.status(), Status::Ok);
        assert_eq!(
            response.into_json::<Value>(),
            Some(json!({ "message": "Movie deleted" }))
        );

        let after = movies(&client);
        assert_eq!(after.len(), before - 1);
        assert!(!ids(&after).contains(&SHAWSHANK_ID.to_owned()));

        let response = client.get(format!("/movies/{SHAWSHANK_ID}")).dispatch();
        assert_eq!(response.status(), Status::NotFound);
    }

    #[test]
    fn repeated_delete_is_not_found() {
        let client = client();
        let before = movies(&client);

        for _ in 0..2 {
            let response = client.delete(format!("/movies/{MISSING_ID}")).dispatch();
            assert_eq!(response.status(), Status::NotFound);
            assert_eq!(
                response.into_json::<Value>(),
                Some(json!({ "message": "Movie not found" }))
            );
        }

        assert_eq!(movies(&client), before);

        client.delete(format!("/movies/{SHAWSHANK_ID}")).dispatch();
        for _ in 0..2 {
            let response = client.delete(format!("/movies/{SHAWSHANK_ID}")).dispatch();
            assert_eq!(response.status(), Status::NotFound);
        }
    }

    #[test]
    fn accepted_origin_is_echoed() {
        let client = client();

        for uri in [
            "/movies".to_owned(),
            format!("/movies/{SHAWSHANK_ID}"),
            "/movies/doesnotexist".to_owned(),
        ] {
            let response = client
                .get(uri.as_str())
                .header(Header::new("Origin", "http://localhost:8080"))
                .dispatch();

            assert_eq!(
                response.headers().get_one("Access-Control-Allow-Origin"),
                Some("http://localhost:8080"),
                "{uri}"
            );
        }

        let response = client
            .delete(format!("/movies/{MISSING_ID}"))
            .header(Header::new("Origin", "http://movies.com"))
            .dispatch();
        assert_eq!(response.status(), Status::NotFound);
        assert_eq!(
            response.headers().get_one("Access-Control-Allow-Origin"),
            Some("http://movies.com")
        );
    }

    #[test]
    fn rejected_origin_gets_no_cors_headers() {
        let client = client();

        let response = client
            .get("/movies")
            .header(Header::new("Origin", "http://evil.com"))
            .dispatch();
        assert_eq!(response.status(), Status::Ok);
        assert_eq!(response.headers().get_one("Access-Control-Allow-Origin"), None);

        let response = client
            .options(format!("/movies/{SHAWSHANK_ID}"))
            .header(Header::new("Origin", "http://evil.com"))
            .dispatch();
        assert_eq!(response.status(), Status::Ok);
        assert_eq!(response.headers().get_one("Access-Control-Allow-Origin"), None);
        assert_eq!(response.headers().get_one("Access-Control-Allow-Methods"), None);
    }

    #[test]
    fn missing_origin_is_allowed_without_echo() {
        let client = client();

        let response = client.get("/movies").dispatch();
        assert_eq!(response.status(), Status::Ok);
        assert_eq!(response.headers().get_one("Access-Control-Allow-Origin"), None);

        let response = client.options(format!("/movies/{SHAWSHANK_ID}")).dispatch();
        assert_eq!(response.status(), Status::Ok);
        assert_eq!(
            response.headers().get_one("Access-Control-Allow-Methods"),
            Some("GET, POST, PATCH, DELETE")
        );
    }

    #[test]
    fn preflight_grants_methods() {
        let client = client();
        let response = client
            .options("/movies/any-id")
            .header(Header::new("Origin", "http://localhost:1234"))
            .dispatch();

        assert_eq!(response.status(), Status::Ok);
        assert_eq!(
            response.headers().get_one("Access-Control-Allow-Origin"),
            Some("http://localhost:1234")
        );
        assert_eq!(
            response.headers().get_one("Access-Control-Allow-Methods"),
            Some("GET, POST, PATCH, DELETE")
        );
        assert!(response.into_string().unwrap_or_default().is_empty());
    }

    #[test]
    fn unknown_route_uses_default_catcher() {
        let client = client();
        let response = client.get("/series").dispatch();

        assert_eq!(response.status(), Status::NotFound);
        assert_eq!(
            response.into_json::<Value>(),
            Some(json!({ "status": 404, "message": "Not Found" }))
        );
    }
}
