use crate::error::NotifierError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use journeysync_notifier_api_structs::get_user_notifications::*;
use journeysync_notifier_domain::{Notification, ID};
use journeysync_notifier_infra::NotifierContext;

fn handle_error(e: UseCaseErrors) -> NotifierError {
    match e {
        UseCaseErrors::StorageError => NotifierError::InternalError,
    }
}

pub async fn get_user_notifications_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<NotifierContext>,
) -> Result<HttpResponse, NotifierError> {
    let usecase = GetUserNotificationsUseCase {
        user_id: path_params.user_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|notifications| HttpResponse::Ok().json(APIResponse::new(notifications)))
        .map_err(handle_error)
}

#[derive(Debug)]
pub struct GetUserNotificationsUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetUserNotificationsUseCase {
    type Response = Vec<Notification>;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &NotifierContext) -> Result<Self::Response, Self::Errors> {
        ctx.repos
            .notifications
            .find_by_user(&self.user_id)
            .await
            .map_err(|_| UseCaseErrors::StorageError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use journeysync_notifier_domain::{Audience, NotificationContent, ReminderTier};

    #[actix_web::test]
    async fn returns_only_the_users_notifications() {
        let ctx = NotifierContext::create_inmemory();
        let user_id = ID::default();

        let mine = Notification::new(
            ID::default(),
            user_id.clone(),
            Audience::Passenger,
            ReminderTier::OneHour,
            NotificationContent {
                title: "Your ride is coming up".into(),
                message: "Be ready.".into(),
            },
            1000,
        );
        let someone_elses = Notification::new(
            ID::default(),
            ID::default(),
            Audience::Driver,
            ReminderTier::OneHour,
            NotificationContent {
                title: "Trip coming up".into(),
                message: "Get the car ready.".into(),
            },
            1000,
        );
        ctx.repos.notifications.insert(&mine).await.unwrap();
        ctx.repos.notifications.insert(&someone_elses).await.unwrap();

        let usecase = GetUserNotificationsUseCase {
            user_id: user_id.clone(),
        };
        let found = execute(usecase, &ctx).await.unwrap();
        assert_eq!(found, vec![mine]);
    }
}
