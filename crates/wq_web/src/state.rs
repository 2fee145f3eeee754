use wq_quiz::QuizService;

pub struct AppState {
    pub service: QuizService,
}

impl AppState {
    pub fn new(service: QuizService) -> Self {
        Self { service }
    }
}
