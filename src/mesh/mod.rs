// mesh/ - Plane geometry and depth displacement
//
// A plane with one vertex per depth sample. Displacement only ever touches Z;
// X/Y keep their regular grid layout.

mod displace;
mod plane;

pub use displace::displace;
pub use plane::PlaneMesh;
