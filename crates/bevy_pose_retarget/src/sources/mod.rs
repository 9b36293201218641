pub mod smpl;
