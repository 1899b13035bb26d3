pub mod mock_crm;

pub use mock_crm::MockCrm;
