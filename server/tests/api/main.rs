mod helpers;
mod submissions;
