use uuid::Uuid;

use crate::domain::repository::EmployeeRepository;
use crate::domain::types::{Employee, EmployeeFields};
use crate::error::ApiError;

// Plain CRUD with no authorization; kept apart from the guarded resources.

pub struct ListEmployeesUseCase<E: EmployeeRepository> {
    pub employees: E,
}

impl<E: EmployeeRepository> ListEmployeesUseCase<E> {
    pub async fn execute(&self) -> Result<Vec<Employee>, ApiError> {
        self.employees.list().await
    }
}

pub struct GetEmployeeUseCase<E: EmployeeRepository> {
    pub employees: E,
}

impl<E: EmployeeRepository> GetEmployeeUseCase<E> {
    pub async fn execute(&self, id: Uuid) -> Result<Employee, ApiError> {
        self.employees
            .find_by_id(id)
            .await?
            .ok_or(ApiError::EmployeeNotFound)
    }
}

pub struct CreateEmployeeUseCase<E: EmployeeRepository> {
    pub employees: E,
}

impl<E: EmployeeRepository> CreateEmployeeUseCase<E> {
    pub async fn execute(&self, fields: EmployeeFields) -> Result<Employee, ApiError> {
        let employee = Employee {
            id: Uuid::new_v4(),
            name: fields.name,
            email: fields.email,
            phone: fields.phone,
            salary: fields.salary,
        };
        self.employees.create(&employee).await?;
        Ok(employee)
    }
}

pub struct UpdateEmployeeUseCase<E: EmployeeRepository> {
    pub employees: E,
}

impl<E: EmployeeRepository> UpdateEmployeeUseCase<E> {
    /// Whole-record replacement, unlike the partial user/category updates.
    pub async fn execute(&self, id: Uuid, fields: EmployeeFields) -> Result<Employee, ApiError> {
        let updated = self.employees.update(id, &fields).await?;
        if !updated {
            return Err(ApiError::EmployeeNotFound);
        }
        Ok(Employee {
            id,
            name: fields.name,
            email: fields.email,
            phone: fields.phone,
            salary: fields.salary,
        })
    }
}

pub struct DeleteEmployeeUseCase<E: EmployeeRepository> {
    pub employees: E,
}

impl<E: EmployeeRepository> DeleteEmployeeUseCase<E> {
    pub async fn execute(&self, id: Uuid) -> Result<(), ApiError> {
        let deleted = self.employees.delete(id).await?;
        if !deleted {
            return Err(ApiError::EmployeeNotFound);
        }
        Ok(())
    }
}
