
mod contact_factory;
mod contact_manager;
mod filter;
mod joint_factory;
mod mesh_contact;
mod sensor;
