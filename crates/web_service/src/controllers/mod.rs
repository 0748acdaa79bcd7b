pub mod webhook_controller;
