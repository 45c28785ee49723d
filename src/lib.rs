mod notify;

use notify::EventNotifier;
use std::sync::Arc;
use tauri::Manager;
use wam_accounts::AccountsService;
use wam_analytics::AnalyticsService;
use wam_autoreply::AutoReplyService;
use wam_campaigns::CampaignWizard;
use wam_contacts::ContactsService;
use wam_content::ContentService;
use wam_core::{BackendClient, ConsoleConfig, Notifier};
use wam_inbox::InboxService;
use wam_templates::TemplatesService;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
  tauri::Builder::default()
    .setup(|app| {
      if cfg!(debug_assertions) {
        app.handle().plugin(
          tauri_plugin_log::Builder::default()
            .level(log::LevelFilter::Info)
            .build(),
        )?;
      }
      // One backend client shared by every domain service
      let config = ConsoleConfig::from_env();
      let client = BackendClient::new(&config).map_err(|e| e.to_string())?;
      let notifier: Arc<dyn Notifier> = Arc::new(EventNotifier::new(app.handle().clone()));

      // Initialize contacts service
      let contacts_service = ContactsService::new(client.clone(), notifier.clone());
      app.manage(contacts_service);

      // Initialize content generation service
      let content_service = ContentService::new(client.clone(), notifier.clone());
      app.manage(content_service);

      // Initialize campaign wizard
      let campaign_wizard = CampaignWizard::new(client.clone(), notifier.clone());
      app.manage(campaign_wizard);

      // Initialize accounts service
      let accounts_service = AccountsService::new(client.clone(), notifier.clone());
      app.manage(accounts_service);

      // Initialize templates service
      let templates_service = TemplatesService::new(client.clone(), notifier.clone());
      app.manage(templates_service);

      // Initialize auto-reply service
      let autoreply_service = AutoReplyService::new(client.clone(), notifier.clone());
      app.manage(autoreply_service);

      // Initialize inbox service
      let inbox_service = InboxService::new(client.clone(), notifier.clone());
      app.manage(inbox_service);

      // Initialize analytics service
      let analytics_service = AnalyticsService::new(client, notifier);
      app.manage(analytics_service);

      Ok(())
    })
    .invoke_handler(tauri::generate_handler![
        wam_contacts::commands::contacts_refresh,
        wam_contacts::commands::contacts_status,
        wam_contacts::commands::contacts_companies,
        wam_contacts::commands::contacts_set_filter,
        wam_contacts::commands::contacts_set_page,
        wam_contacts::commands::contacts_page,
        wam_contacts::commands::contacts_toggle,
        wam_contacts::commands::contacts_select_page,
        wam_contacts::commands::contacts_deselect_page,
        wam_contacts::commands::contacts_select_all_visible,
        wam_contacts::commands::contacts_clear_selection,
        wam_contacts::commands::contacts_selected,
        wam_content::commands::content_config,
        wam_content::commands::content_set_config,
        wam_content::commands::content_ready,
        wam_content::commands::content_generate,
        wam_content::commands::content_brand_voices,
        wam_content::commands::content_generated,
        wam_content::commands::content_begin_edit,
        wam_content::commands::content_update_draft,
        wam_content::commands::content_save_edit,
        wam_content::commands::content_cancel_edit,
        wam_content::commands::content_discard,
        wam_content::commands::content_clear,
        wam_campaigns::commands::campaigns_view,
        wam_campaigns::commands::campaigns_next,
        wam_campaigns::commands::campaigns_back,
        wam_campaigns::commands::campaigns_goto,
        wam_campaigns::commands::campaigns_set_name,
        wam_campaigns::commands::campaigns_set_config,
        wam_campaigns::commands::campaigns_set_account,
        wam_campaigns::commands::campaigns_generate,
        wam_campaigns::commands::campaigns_set_generated,
        wam_campaigns::commands::campaigns_begin_edit,
        wam_campaigns::commands::campaigns_update_draft,
        wam_campaigns::commands::campaigns_save_edit,
        wam_campaigns::commands::campaigns_cancel_edit,
        wam_campaigns::commands::campaigns_regenerate,
        wam_campaigns::commands::campaigns_set_recipients,
        wam_campaigns::commands::campaigns_set_schedule,
        wam_campaigns::commands::campaigns_schedule_summary,
        wam_campaigns::commands::campaigns_business_hours_preset,
        wam_campaigns::commands::campaigns_set_tracking,
        wam_campaigns::commands::campaigns_submit,
        wam_campaigns::commands::campaigns_list,
        wam_campaigns::commands::campaigns_reset,
        wam_accounts::commands::accounts_list,
        wam_accounts::commands::accounts_providers,
        wam_accounts::commands::accounts_detect_provider,
        wam_accounts::commands::accounts_view,
        wam_accounts::commands::accounts_next,
        wam_accounts::commands::accounts_back,
        wam_accounts::commands::accounts_goto,
        wam_accounts::commands::accounts_set_business_info,
        wam_accounts::commands::accounts_select_provider,
        wam_accounts::commands::accounts_set_environment,
        wam_accounts::commands::accounts_set_credential,
        wam_accounts::commands::accounts_set_phone,
        wam_accounts::commands::accounts_request_code,
        wam_accounts::commands::accounts_verify_code,
        wam_accounts::commands::accounts_set_api_version,
        wam_accounts::commands::accounts_set_webhook,
        wam_accounts::commands::accounts_test_connection,
        wam_accounts::commands::accounts_submit,
        wam_accounts::commands::accounts_update,
        wam_accounts::commands::accounts_delete,
        wam_accounts::commands::accounts_reset,
        wam_templates::commands::templates_list,
        wam_templates::commands::templates_get,
        wam_templates::commands::templates_create,
        wam_templates::commands::templates_update,
        wam_templates::commands::templates_delete,
        wam_templates::commands::templates_preview,
        wam_templates::commands::templates_preview_stored,
        wam_templates::commands::templates_test_send,
        wam_autoreply::commands::autoreply_list,
        wam_autoreply::commands::autoreply_create,
        wam_autoreply::commands::autoreply_update,
        wam_autoreply::commands::autoreply_delete,
        wam_autoreply::commands::autoreply_toggle,
        wam_autoreply::commands::autoreply_test_local,
        wam_autoreply::commands::autoreply_test_remote,
        wam_autoreply::commands::autoreply_conversation,
        wam_inbox::commands::inbox_refresh,
        wam_inbox::commands::inbox_page,
        wam_inbox::commands::inbox_set_filter,
        wam_inbox::commands::inbox_set_page,
        wam_inbox::commands::inbox_conversations,
        wam_inbox::commands::inbox_send_reply,
        wam_analytics::commands::analytics_refresh,
        wam_analytics::commands::analytics_dashboard,
        wam_analytics::commands::analytics_campaigns
    ])
    .run(tauri::generate_context!())
    .expect("error while running tauri application");
}
