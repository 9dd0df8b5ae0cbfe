use crate::conda::CondaExecutionAgent;
use crate::config::SessionConfig;
use crate::provisioner::EnvironmentProvisioner;

pub struct ProvisionerFactory;

impl ProvisionerFactory {
    pub fn create_conda(session: &SessionConfig) -> Box<dyn EnvironmentProvisioner> {
        Box::new(CondaExecutionAgent::new(&session.conda_executable))
    }
}
