use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::{Employee, EmployeeFields};
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::employee::{
    CreateEmployeeUseCase, DeleteEmployeeUseCase, GetEmployeeUseCase, ListEmployeesUseCase,
    UpdateEmployeeUseCase,
};

// ── Request/response types ───────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub salary: f64,
}

impl From<EmployeeRequest> for EmployeeFields {
    fn from(body: EmployeeRequest) -> Self {
        EmployeeFields {
            name: body.name,
            email: body.email,
            phone: body.phone,
            salary: body.salary,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub salary: f64,
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        EmployeeResponse {
            id: employee.id,
            name: employee.name,
            email: employee.email,
            phone: employee.phone,
            salary: employee.salary,
        }
    }
}

// ── GET /employees ───────────────────────────────────────────────────────────

pub async fn list_employees(
    State(state): State<AppState>,
) -> Result<Json<Vec<EmployeeResponse>>, ApiError> {
    let usecase = ListEmployeesUseCase {
        employees: state.employee_repo(),
    };
    let employees = usecase.execute().await?;
    Ok(Json(employees.into_iter().map(Into::into).collect()))
}

// ── GET /employees/{id} ──────────────────────────────────────────────────────

pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EmployeeResponse>, ApiError> {
    let usecase = GetEmployeeUseCase {
        employees: state.employee_repo(),
    };
    let employee = usecase.execute(id).await?;
    Ok(Json(employee.into()))
}

// ── POST /employees ──────────────────────────────────────────────────────────

pub async fn create_employee(
    State(state): State<AppState>,
    Json(body): Json<EmployeeRequest>,
) -> Result<Json<EmployeeResponse>, ApiError> {
    let usecase = CreateEmployeeUseCase {
        employees: state.employee_repo(),
    };
    let employee = usecase.execute(body.into()).await?;
    Ok(Json(employee.into()))
}

// ── PUT /employees/{id} ──────────────────────────────────────────────────────

pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<EmployeeRequest>,
) -> Result<Json<EmployeeResponse>, ApiError> {
    let usecase = UpdateEmployeeUseCase {
        employees: state.employee_repo(),
    };
    let employee = usecase.execute(id, body.into()).await?;
    Ok(Json(employee.into()))
}

// ── DELETE /employees/{id} ───────────────────────────────────────────────────

pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let usecase = DeleteEmployeeUseCase {
        employees: state.employee_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::OK)
}
