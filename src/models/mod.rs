pub mod assessment;
pub mod condition;
pub mod consultation;
pub mod conversation;
pub mod enums;
pub mod guidance;
pub mod symptom;

pub use assessment::*;
pub use condition::*;
pub use consultation::*;
pub use conversation::*;
pub use enums::*;
pub use guidance::*;
pub use symptom::*;
