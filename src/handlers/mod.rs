pub mod auth;
pub mod dashboard;
pub mod portfolio;
pub mod profiles;
pub mod requests;

use actix_web::web;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Auth routes (login/signup are public; logout and me need a session) ──
    cfg.service(
        web::scope("/auth")
            .route("/login", web::post().to(auth::login))
            .route("/signup/{role}", web::post().to(auth::signup))
            .route("/logout", web::post().to(auth::logout))
            .route("/me", web::get().to(auth::me)),
    );

    // ── Dashboards (self only) ──
    cfg.service(
        web::scope("/dashboard")
            .route("/freelancer/{id}", web::get().to(dashboard::freelancer_dashboard))
            .route("/client/{id}", web::get().to(dashboard::client_dashboard)),
    );

    // ── Public freelancer listings ──
    cfg.service(web::resource("/freelancers").route(web::get().to(dashboard::list_freelancers)));
    cfg.service(
        web::resource("/freelancers/{id}").route(web::get().to(dashboard::freelancer_profile)),
    );

    // ── Profile details ──
    cfg.service(
        web::resource("/profiles/{id}")
            .route(web::get().to(profiles::get_profile))
            .route(web::put().to(profiles::update_profile)),
    );
    cfg.service(
        web::resource("/profiles/{id}/image")
            .route(web::put().to(profiles::upload_profile_image)),
    );

    // ── Portfolio routes ──
    cfg.service(web::resource("/portfolios").route(web::post().to(portfolio::create_portfolio)));
    cfg.service(
        web::resource("/portfolios/{id}").route(web::delete().to(portfolio::delete_portfolio)),
    );
    cfg.service(
        web::resource("/portfolios/freelancer/{freelancer_id}")
            .route(web::get().to(portfolio::get_portfolios_by_freelancer)),
    );

    // ── Request workflow ──
    cfg.service(
        web::scope("/requests")
            .route("", web::post().to(requests::create_request))
            .route("/incoming", web::get().to(requests::get_incoming))
            .route("/outgoing", web::get().to(requests::get_outgoing))
            .route("/{id}/status", web::put().to(requests::update_status))
            .route("/{id}", web::delete().to(requests::cancel_request)),
    );
}
