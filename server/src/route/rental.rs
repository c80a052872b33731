mod request;
mod response;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::rental::request::{CreateRequest, FinishRequest, GetRequest, Transformer};
use crate::route::rental::response::{CreatedPresenter, Presenter};
use application::service::{CreateRentalService, FinishRentalService, GetRentalService};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use uuid::Uuid;

pub trait RentalRouter {
    fn route_rental(self) -> Self;
}

impl RentalRouter for Router<AppModule> {
    fn route_rental(self) -> Self {
        self.route(
            "/rentals",
            get(|State(handler): State<AppModule>| async move {
                Controller::new((), Presenter)
                    .bypass(|| async move { handler.database().get_all_rentals().await })
                    .await
                    .map_err(ErrorStatus::from)
            })
            .post(
                |State(handler): State<AppModule>,
                 req: Result<Json<CreateRequest>, JsonRejection>| async move {
                    let Json(req) = req?;
                    Controller::new(Transformer, CreatedPresenter)
                        .try_intake(req)?
                        .handle(|dto| async move { handler.database().create_rental(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/rentals/finish",
            post(
                |State(handler): State<AppModule>,
                 req: Result<Json<FinishRequest>, JsonRejection>| async move {
                    let Json(req) = req?;
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|dto| async move { handler.database().finish_rental(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/rentals/:id",
            get(
                |State(handler): State<AppModule>,
                 id: Result<Path<Uuid>, PathRejection>| async move {
                    let Path(id) = id?;
                    Controller::new(Transformer, Presenter)
                        .intake(GetRequest::new(id))
                        .handle(|dto| async move { handler.database().get_rental(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
