//! SeaORM entities. There is deliberately no relation between the two
//! tables: the post→author reference is checked by the services only.

pub mod author;
pub mod post;
