use serde::Deserialize;
use uuid::Uuid;

pub mod roster;
pub mod student;

#[derive(Deserialize)]
pub struct IdForm {
    pub id: Uuid,
}
