//! The four table-backed resources and the operations each one exposes.

use crate::error::AppError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resource {
    Users,
    Clients,
    Products,
    Sales,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    List,
    Read,
    Create,
    Update,
    Delete,
}

impl Resource {
    pub const ALL: [Resource; 4] = [
        Resource::Users,
        Resource::Clients,
        Resource::Products,
        Resource::Sales,
    ];

    /// Path segment under `/api`, identical to the table name.
    pub fn path_segment(self) -> &'static str {
        self.table()
    }

    pub fn table(self) -> &'static str {
        match self {
            Resource::Users => "users",
            Resource::Clients => "clients",
            Resource::Products => "products",
            Resource::Sales => "sales",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Resource::Users => "User",
            Resource::Clients => "Client",
            Resource::Products => "Product",
            Resource::Sales => "Sale",
        }
    }

    /// User rows are only created through signup.
    pub fn allows(self, op: Operation) -> bool {
        !matches!((self, op), (Resource::Users, Operation::Create))
    }

    pub fn deleted_message(self) -> String {
        format!("{} deleted successfully!", self.label())
    }

    /// Resolve a path segment and check that the operation is offered.
    pub fn resolve(segment: &str, op: Operation) -> Result<Resource, AppError> {
        let resource: Resource = segment.parse()?;
        if !resource.allows(op) {
            return Err(AppError::MethodNotAllowed(format!(
                "{:?} not allowed on {}",
                op,
                resource.path_segment()
            )));
        }
        Ok(resource)
    }
}

impl std::str::FromStr for Resource {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|r| r.path_segment() == s)
            .ok_or_else(|| AppError::NotFound(format!("unknown resource: {}", s)))
    }
}
