use crate::models::{JobPosting, Role};

/// Every place a user can be in the portal
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Home,
    Login,
    ChooseRegistration,
    RegisterStudent,
    RegisterCompany,
    RegisterAdmin,
    Jobs,
    JobDetails { job: Box<JobPosting> },
    MyApplications,
    Profile,
    CompanyPanel,
    JobForm { editing: Option<Box<JobPosting>> },
    AdminDashboard,
    AdminAreas,
    AdminStudents,
    AdminCompanies,
    AdminJobs,
}

impl Screen {
    /// Whether a user with `role` (None when logged out) may enter the screen
    pub fn allows(&self, role: Option<Role>) -> bool {
        match self {
            Screen::Home
            | Screen::Login
            | Screen::ChooseRegistration
            | Screen::RegisterStudent
            | Screen::RegisterCompany
            | Screen::RegisterAdmin => true,
            // anonymous visitors browse open jobs too
            Screen::Jobs | Screen::JobDetails { .. } => true,
            Screen::MyApplications | Screen::Profile => role == Some(Role::Student),
            Screen::CompanyPanel | Screen::JobForm { .. } => role == Some(Role::Company),
            Screen::AdminDashboard
            | Screen::AdminAreas
            | Screen::AdminStudents
            | Screen::AdminCompanies
            | Screen::AdminJobs => role == Some(Role::Admin),
        }
    }

    /// Where a freshly logged in user goes
    pub fn landing(role: Role) -> Self {
        match role {
            Role::Student => Screen::Jobs,
            Role::Company => Screen::CompanyPanel,
            Role::Admin => Screen::AdminDashboard,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Home => "Portal de Estágios",
            Screen::Login => "Login",
            Screen::ChooseRegistration => "Cadastro",
            Screen::RegisterStudent => "Cadastro de Estudante",
            Screen::RegisterCompany => "Cadastro de Empresa",
            Screen::RegisterAdmin => "Cadastro de Administrador",
            Screen::Jobs => "Vagas Disponíveis",
            Screen::JobDetails { .. } => "Detalhes da Vaga",
            Screen::MyApplications => "Minhas Candidaturas",
            Screen::Profile => "Meu Perfil",
            Screen::CompanyPanel => "Painel da Empresa",
            Screen::JobForm { editing: Some(_) } => "Editar Vaga",
            Screen::JobForm { editing: None } => "Nova Vaga",
            Screen::AdminDashboard => "Dashboard",
            Screen::AdminAreas => "Áreas de Interesse",
            Screen::AdminStudents => "Estudantes",
            Screen::AdminCompanies => "Empresas",
            Screen::AdminJobs => "Vagas",
        }
    }
}
