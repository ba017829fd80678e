use application::service::{
    CreateLoanService, DeleteLoanService, GetLoanService, ReturnLoanService, UpdateLoanService,
};
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use uuid::Uuid;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::request::{
    CreateLoanRequest, DeleteLoanRequest, GetBookLoansRequest, GetLoanRequest,
    GetUserLoansRequest, LoanTransformer, ReturnLoanQuery, UpdateLoanRequest,
};
use crate::response::{Created, LoanPresenter};

pub trait LoanRouter {
    fn route_loan(self) -> Self;
}

impl LoanRouter for Router<AppModule> {
    fn route_loan(self) -> Self {
        self.route(
            "/api/v1/loans",
            get(|State(module): State<AppModule>| async move {
                Controller::new((), LoanPresenter)
                    .bypass(|| module.get_all_loans())
                    .await
                    .map_err(ErrorStatus::from)
            })
            .post(
                |State(module): State<AppModule>,
                 WithRejection(Json(req), _): WithRejection<
                    Json<CreateLoanRequest>,
                    ErrorStatus,
                >| async move {
                    Controller::new(LoanTransformer, LoanPresenter)
                        .try_intake(req)?
                        .handle(|dto| module.create_loan(dto))
                        .await
                        .map(Created)
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/api/v1/loans/:id",
            get(
                |State(module): State<AppModule>,
                 WithRejection(Path(id), _): WithRejection<Path<Uuid>, ErrorStatus>| async move {
                    Controller::new(LoanTransformer, LoanPresenter)
                        .intake(GetLoanRequest::new(id))
                        .handle(|dto| module.get_loan(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .put(
                |State(module): State<AppModule>,
                 WithRejection(Path(id), _): WithRejection<Path<Uuid>, ErrorStatus>,
                 WithRejection(Json(req), _): WithRejection<
                    Json<UpdateLoanRequest>,
                    ErrorStatus,
                >| async move {
                    Controller::new(LoanTransformer, LoanPresenter)
                        .intake((id, req))
                        .handle(|dto| module.update_loan(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .delete(
                |State(module): State<AppModule>,
                 WithRejection(Path(id), _): WithRejection<Path<Uuid>, ErrorStatus>| async move {
                    Controller::new(LoanTransformer, LoanPresenter)
                        .intake(DeleteLoanRequest::new(id))
                        .handle(|dto| module.delete_loan(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/api/v1/loans/user/:user_id",
            get(
                |State(module): State<AppModule>,
                 WithRejection(Path(user_id), _): WithRejection<Path<Uuid>, ErrorStatus>| async move {
                    Controller::new(LoanTransformer, LoanPresenter)
                        .intake(GetUserLoansRequest::new(user_id))
                        .handle(|dto| module.get_loans_by_user(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/api/v1/loans/book/:book_id",
            get(
                |State(module): State<AppModule>,
                 WithRejection(Path(book_id), _): WithRejection<Path<Uuid>, ErrorStatus>| async move {
                    Controller::new(LoanTransformer, LoanPresenter)
                        .intake(GetBookLoansRequest::new(book_id))
                        .handle(|dto| module.get_loans_by_book(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/api/v1/loans/:id/return",
            post(
                |State(module): State<AppModule>,
                 WithRejection(Path(id), _): WithRejection<Path<Uuid>, ErrorStatus>,
                 WithRejection(Query(query), _): WithRejection<
                    Query<ReturnLoanQuery>,
                    ErrorStatus,
                >| async move {
                    Controller::new(LoanTransformer, LoanPresenter)
                        .intake((id, query))
                        .handle(|dto| module.return_loan(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
